use crate::app::form::{
    attach_subjects_json, HiddenFields, TIMETABLE_SLOTS_FIELD, TOTAL_HOURS_FIELD,
};
use crate::app::{remote_loader, stored_loader};
use crate::core::modal::ModalController;
use crate::core::sequence::{LoadSequence, LoadTicket};
use crate::core::slot_parser::parse_subject_names;
use crate::core::subject_list::SubjectList;
use crate::domain::model::{EntryHandle, Notice, StoredSubject};
use crate::domain::ports::{KeyValueStore, Notifier, RawResponse, ScheduleBackend};
use crate::utils::error::{PlannerError, Result};
use serde_json::Value;

pub const DEFAULT_TOTAL_HOURS_KEY: &str = "totalHours";

/// Everything the page shows and submits.
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub subjects: SubjectList,
    pub modal: ModalController,
    pub hidden: HiddenFields,
    pub total_hours: String,
}

/// Data the server renders into the page on load.
#[derive(Debug, Clone, Default)]
pub struct InitialData {
    pub subjects_json: Option<String>,
    pub timetable_json: Option<String>,
}

pub struct PlannerPage<B: ScheduleBackend, N: Notifier, K: KeyValueStore> {
    state: PageState,
    backend: B,
    notifier: N,
    store: K,
    sequence: LoadSequence,
    total_hours_key: String,
}

impl<B: ScheduleBackend, N: Notifier, K: KeyValueStore> PlannerPage<B, N, K> {
    pub fn new(backend: B, notifier: N, store: K) -> Self {
        Self {
            state: PageState::default(),
            backend,
            notifier,
            store,
            sequence: LoadSequence::new(),
            total_hours_key: DEFAULT_TOTAL_HOURS_KEY.to_string(),
        }
    }

    pub fn with_total_hours_key(mut self, key: impl Into<String>) -> Self {
        self.total_hours_key = key.into();
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn subjects(&self) -> &SubjectList {
        &self.state.subjects
    }

    /// 初始化順序：已儲存科目 → 時間表 → 一筆空白
    pub fn initialize(&mut self, initial: &InitialData) {
        let timetable = initial
            .timetable_json
            .as_deref()
            .filter(|raw| !raw.trim().is_empty());

        let slots = match timetable.map(|raw| serde_json::from_str::<Value>(raw)) {
            Some(Ok(value)) => value,
            Some(Err(e)) => {
                tracing::error!("Error parsing initial timetable JSON: {}", e);
                Value::Null
            }
            None => Value::Null,
        };
        if let Some(raw) = timetable {
            self.state.hidden.replace(TIMETABLE_SLOTS_FIELD, raw);
        }

        let saved = match initial.subjects_json.as_deref() {
            Some(raw) => serde_json::from_str::<Vec<StoredSubject>>(raw).unwrap_or_else(|e| {
                tracing::error!("Error parsing initial subjects JSON: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let has_slots = slots.as_array().is_some_and(|items| !items.is_empty());
        if !saved.is_empty() {
            self.state.subjects.populate_from_subjects(&saved);
            tracing::info!("Page load: filled the list from {} saved subjects", saved.len());
        } else if has_slots {
            let names = parse_subject_names(&slots);
            self.state.subjects.populate_from_names(&names);
            tracing::info!("Page load: filled the list from the timetable (no saved subjects)");
        } else if self.state.subjects.ensure_non_empty() {
            tracing::info!("Page load: added the initial subject entry");
        }

        match self.store.get(&self.total_hours_key) {
            Ok(Some(hours)) => {
                tracing::debug!("Restored cached total hours: {}", hours);
                self.state.total_hours = hours;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("⚠️ Could not read cached total hours: {}", e),
        }
    }

    pub fn add_subject(
        &mut self,
        after: Option<EntryHandle>,
        name: impl Into<String>,
        weight: u8,
        major: bool,
    ) -> EntryHandle {
        self.state.subjects.add(after, name, weight, major)
    }

    /// 刪除失敗（最後一筆）時顯示提示並回傳 false
    pub fn remove_subject(&mut self, handle: EntryHandle) -> bool {
        match self.state.subjects.remove(handle) {
            Ok(removed) => removed.is_some(),
            Err(e @ PlannerError::LastSubjectError) => {
                self.notifier.notify(Notice::warning(e.to_string()));
                false
            }
            Err(e) => {
                self.notifier.notify(Notice::error(e.user_friendly_message()));
                false
            }
        }
    }

    pub fn set_subject_name(&mut self, handle: EntryHandle, name: impl Into<String>) -> bool {
        self.state.subjects.set_name(handle, name)
    }

    pub fn set_subject_weight(&mut self, handle: EntryHandle, weight: i64) -> bool {
        self.state.subjects.set_weight(handle, weight)
    }

    pub fn set_subject_major(&mut self, handle: EntryHandle, major: bool) -> bool {
        self.state.subjects.set_major(handle, major)
    }

    pub fn update_displayed_weight(&mut self, display_id: &str, value: &str) {
        self.state.subjects.update_displayed_weight(display_id, value);
    }

    pub fn open_modal(&mut self) {
        self.state.modal.open();
    }

    pub fn close_modal(&mut self) {
        self.state.modal.close();
    }

    pub fn set_modal_url(&mut self, url: impl Into<String>) {
        self.state.modal.set_url(url);
    }

    pub fn set_total_hours(&mut self, hours: impl Into<String>) {
        self.state.total_hours = hours.into();
        self.cache_total_hours();
    }

    /// Validates the modal URL and stamps a new load. `None` means the
    /// request was rejected locally and a notice was shown.
    pub fn begin_remote_load(&mut self) -> Option<(LoadTicket, String)> {
        match remote_loader::prepare_url(self.state.modal.url()) {
            Ok(url) => Some((self.sequence.issue(), url)),
            Err(notice) => {
                self.notifier.notify(notice);
                None
            }
        }
    }

    /// Returns false when a newer load superseded this one.
    pub fn finish_remote_load(&mut self, ticket: LoadTicket, outcome: Result<RawResponse>) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Dropping stale timetable response for {:?}", ticket);
            return false;
        }
        let notice = remote_loader::apply_response(&mut self.state, outcome);
        self.notifier.notify(notice);
        true
    }

    pub async fn submit_timetable_url(&mut self) -> bool {
        let Some((ticket, url)) = self.begin_remote_load() else {
            return false;
        };
        tracing::info!("📡 Requesting timetable for {}", url);
        let outcome = self.backend.process_timetable(&url).await;
        self.finish_remote_load(ticket, outcome)
    }

    pub fn begin_stored_load(&mut self) -> LoadTicket {
        self.sequence.issue()
    }

    pub fn finish_stored_load(&mut self, ticket: LoadTicket, outcome: Result<RawResponse>) -> bool {
        if !self.sequence.is_current(ticket) {
            tracing::debug!("Dropping stale stored-timetable response for {:?}", ticket);
            return false;
        }
        let notice = stored_loader::apply_response(&mut self.state, outcome);
        self.notifier.notify(notice);
        true
    }

    pub async fn load_stored_timetable(&mut self) -> bool {
        let ticket = self.begin_stored_load();
        tracing::info!("📡 Requesting stored timetable");
        let outcome = self.backend.load_stored_timetable().await;
        self.finish_stored_load(ticket, outcome)
    }

    /// Runs the submission collector and returns the form fields in document order.
    pub fn prepare_submission(&mut self) -> Result<Vec<(String, String)>> {
        let count = attach_subjects_json(&self.state.subjects, &mut self.state.hidden)?;
        tracing::debug!("Prepared plan submission with {} subjects", count);
        self.cache_total_hours();

        let mut fields = vec![(
            TOTAL_HOURS_FIELD.to_string(),
            self.state.total_hours.clone(),
        )];
        fields.extend(
            self.state
                .hidden
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        Ok(fields)
    }

    pub async fn submit_plan(&mut self) -> Result<RawResponse> {
        let fields = self.prepare_submission()?;
        tracing::info!("📤 Submitting plan form");
        let response = self.backend.submit_plan(&fields).await?;
        if !response.is_success() {
            tracing::warn!("⚠️ Plan submission returned status {}", response.status);
        }
        Ok(response)
    }

    fn cache_total_hours(&self) {
        if let Err(e) = self.store.set(&self.total_hours_key, &self.state.total_hours) {
            tracing::warn!("⚠️ Could not cache total hours: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::app::form::SUBJECTS_JSON_FIELD;
    use crate::domain::model::{NoticeLevel, Subject};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        notices: Arc<Mutex<Vec<Notice>>>,
    }

    impl RecordingNotifier {
        fn taken(&self) -> Vec<Notice> {
            std::mem::take(&mut *self.notices.lock().unwrap())
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        process: Option<RawResponse>,
        stored: Option<RawResponse>,
        submitted: Mutex<Vec<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl ScheduleBackend for FakeBackend {
        async fn process_timetable(&self, url: &str) -> Result<RawResponse> {
            self.process.clone().ok_or_else(|| PlannerError::ResponseError {
                endpoint: url.to_string(),
                message: "no canned response".to_string(),
            })
        }

        async fn load_stored_timetable(&self) -> Result<RawResponse> {
            self.stored.clone().ok_or_else(|| PlannerError::ResponseError {
                endpoint: "/load_stored_timetable".to_string(),
                message: "no canned response".to_string(),
            })
        }

        async fn submit_plan(&self, fields: &[(String, String)]) -> Result<RawResponse> {
            self.submitted.lock().unwrap().push(fields.to_vec());
            Ok(RawResponse::new(200, "<html>plan</html>"))
        }
    }

    fn page_with(
        backend: FakeBackend,
    ) -> (PlannerPage<FakeBackend, RecordingNotifier, MemoryStore>, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let page = PlannerPage::new(backend, notifier.clone(), MemoryStore::new());
        (page, notifier)
    }

    #[test]
    fn test_fresh_page_has_one_blank_entry() {
        let (mut page, _) = page_with(FakeBackend::default());
        page.initialize(&InitialData::default());

        assert_eq!(page.subjects().subjects(), vec![Subject::blank()]);
        assert_eq!(page.state().total_hours, "");
    }

    #[test]
    fn test_initialize_prefers_saved_subjects() {
        let (mut page, _) = page_with(FakeBackend::default());
        page.initialize(&InitialData {
            subjects_json: Some(r#"[{"name":"OS","weight":70,"major":1.0}]"#.to_string()),
            timetable_json: Some(r#"[["수업","Math"]]"#.to_string()),
        });

        assert_eq!(page.subjects().subjects(), vec![Subject::new("OS", 70, true)]);
        assert_eq!(
            page.state().hidden.get(TIMETABLE_SLOTS_FIELD),
            Some(r#"[["수업","Math"]]"#)
        );
    }

    #[test]
    fn test_initialize_falls_back_to_timetable_then_blank() {
        let (mut page, _) = page_with(FakeBackend::default());
        page.initialize(&InitialData {
            subjects_json: Some("[]".to_string()),
            timetable_json: Some(r#"[["수업","Math"],["수업","Bio"]]"#.to_string()),
        });
        assert_eq!(page.subjects().len(), 2);

        let (mut page, _) = page_with(FakeBackend::default());
        page.initialize(&InitialData {
            subjects_json: Some("{broken".to_string()),
            timetable_json: Some("also broken".to_string()),
        });
        assert_eq!(page.subjects().subjects(), vec![Subject::blank()]);
    }

    #[test]
    fn test_initialize_restores_cached_total_hours() {
        let store = MemoryStore::new();
        store.set(DEFAULT_TOTAL_HOURS_KEY, "21").unwrap();
        let mut page = PlannerPage::new(FakeBackend::default(), RecordingNotifier::default(), store);
        page.initialize(&InitialData::default());
        assert_eq!(page.state().total_hours, "21");
    }

    #[test]
    fn test_removing_last_subject_notifies() {
        let (mut page, notifier) = page_with(FakeBackend::default());
        page.initialize(&InitialData::default());
        let only = page.subjects().iter().next().unwrap().handle;

        assert!(!page.remove_subject(only));
        assert_eq!(page.subjects().len(), 1);
        assert_eq!(
            notifier.taken(),
            vec![Notice::warning("At least one subject must remain.")]
        );

        let second = page.add_subject(Some(only), "DB", 50, false);
        assert!(page.remove_subject(second));
        assert!(notifier.taken().is_empty());
    }

    #[test]
    fn test_empty_url_is_rejected_without_request() {
        let (mut page, notifier) = page_with(FakeBackend::default());
        page.initialize(&InitialData::default());
        page.open_modal();

        let applied = tokio_test::block_on(page.submit_timetable_url());

        assert!(!applied);
        assert_eq!(
            notifier.taken(),
            vec![Notice::warning(remote_loader::EMPTY_URL_MESSAGE)]
        );
        assert!(page.state().modal.is_visible());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_list() {
        let (mut page, notifier) = page_with(FakeBackend::default());
        page.initialize(&InitialData::default());
        page.add_subject(None, "Keep", 50, false);
        page.set_modal_url("https://everytime.kr/@abc");

        assert!(page.submit_timetable_url().await);
        let notices = notifier.taken();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(page.subjects().len(), 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let (mut page, notifier) = page_with(FakeBackend::default());
        page.initialize(&InitialData::default());
        page.set_modal_url("https://everytime.kr/@first");

        let (first, _) = page.begin_remote_load().unwrap();
        let second = page.begin_stored_load();

        let late = RawResponse::new(200, json!({"timetable_slots": [["수업", "Stale"]]}).to_string());
        assert!(!page.finish_remote_load(first, Ok(late)));
        assert_eq!(page.subjects().subjects(), vec![Subject::blank()]);
        assert!(notifier.taken().is_empty());

        let fresh = RawResponse::new(200, json!({"timetable_slots": [["수업", "Fresh"]]}).to_string());
        assert!(page.finish_stored_load(second, Ok(fresh)));
        assert_eq!(page.subjects().subjects(), vec![Subject::new("Fresh", 50, false)]);
    }

    #[tokio::test]
    async fn test_submit_plan_sends_fields_and_caches_hours() {
        let (mut page, _) = page_with(FakeBackend::default());
        page.initialize(&InitialData {
            subjects_json: None,
            timetable_json: Some(r#"[["수업","Algorithms"]]"#.to_string()),
        });
        let handle = page.subjects().iter().next().unwrap().handle;
        page.set_subject_weight(handle, 80);
        page.add_subject(None, "", 50, false);
        page.set_total_hours("18");

        let response = page.submit_plan().await.unwrap();
        assert!(response.is_success());
        page.submit_plan().await.unwrap();

        let submitted = page.backend.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 2);
        let fields = &submitted[1];
        assert_eq!(fields[0], ("total_hours".to_string(), "18".to_string()));
        let subjects_json: Vec<_> = fields
            .iter()
            .filter(|(name, _)| name == SUBJECTS_JSON_FIELD)
            .collect();
        assert_eq!(subjects_json.len(), 1);
        assert_eq!(
            subjects_json[0].1,
            r#"[{"name":"Algorithms","weight":80,"major":false}]"#
        );
        assert_eq!(
            page.store.get(DEFAULT_TOTAL_HOURS_KEY).unwrap().as_deref(),
            Some("18")
        );
    }
}
