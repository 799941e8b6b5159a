use crate::domain::model::{EntryHandle, StoredSubject, Subject, DEFAULT_WEIGHT, MAX_WEIGHT};
use crate::utils::error::{PlannerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntry {
    pub handle: EntryHandle,
    pub subject: Subject,
    /// 滑桿右側顯示的數值文字
    pub readout: String,
}

/// Ordered subject entries plus the counter that mints their handles.
#[derive(Debug, Clone, Default)]
pub struct SubjectList {
    entries: Vec<SubjectEntry>,
    counter: u64,
}

impl SubjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectEntry> {
        self.entries.iter()
    }

    pub fn get(&self, handle: EntryHandle) -> Option<&SubjectEntry> {
        self.entries.iter().find(|entry| entry.handle == handle)
    }

    pub fn subjects(&self) -> Vec<Subject> {
        self.entries.iter().map(|entry| entry.subject.clone()).collect()
    }

    /// Removes every entry and resets the counter to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counter = 0;
    }

    pub fn add(
        &mut self,
        after: Option<EntryHandle>,
        name: impl Into<String>,
        weight: u8,
        major: bool,
    ) -> EntryHandle {
        self.counter += 1;
        let handle = EntryHandle(self.counter);
        let subject = Subject::new(name, weight, major);
        let entry = SubjectEntry {
            handle,
            readout: subject.weight.to_string(),
            subject,
        };

        let position = after
            .and_then(|after| self.position(after))
            .map(|index| index + 1)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
        handle
    }

    pub fn add_blank(&mut self, after: Option<EntryHandle>) -> EntryHandle {
        self.add(after, "", DEFAULT_WEIGHT, false)
    }

    /// 僅剩一筆時拒絕刪除；找不到 handle 回傳 `Ok(None)`
    pub fn remove(&mut self, handle: EntryHandle) -> Result<Option<Subject>> {
        let Some(index) = self.position(handle) else {
            return Ok(None);
        };
        if self.entries.len() <= 1 {
            return Err(PlannerError::LastSubjectError);
        }
        Ok(Some(self.entries.remove(index).subject))
    }

    pub fn populate_from_names(&mut self, names: &[String]) {
        self.clear();
        for name in names {
            self.add(None, name.clone(), DEFAULT_WEIGHT, false);
        }
        self.ensure_non_empty();
    }

    pub fn populate_from_subjects(&mut self, subjects: &[StoredSubject]) {
        self.clear();
        for stored in subjects {
            let subject = stored.to_subject();
            self.add(None, subject.name, subject.weight, subject.major);
        }
        self.ensure_non_empty();
    }

    /// 清單為空時補上一筆空白項目，回傳是否有補
    pub fn ensure_non_empty(&mut self) -> bool {
        if self.entries.is_empty() {
            self.add_blank(None);
            true
        } else {
            false
        }
    }

    /// Syncs the readout next to a range control. Unknown ids are ignored.
    pub fn update_displayed_weight(&mut self, display_id: &str, value: &str) {
        let Some(handle) = crate::core::view::handle_from_display_id(display_id) else {
            return;
        };
        if let Some(entry) = self.entry_mut(handle) {
            entry.readout = value.to_string();
        }
    }

    pub fn set_name(&mut self, handle: EntryHandle, name: impl Into<String>) -> bool {
        match self.entry_mut(handle) {
            Some(entry) => {
                entry.subject.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Range controls clamp to 0..=100; the readout follows the control.
    pub fn set_weight(&mut self, handle: EntryHandle, weight: i64) -> bool {
        match self.entry_mut(handle) {
            Some(entry) => {
                let clamped = weight.clamp(0, i64::from(MAX_WEIGHT)) as u8;
                entry.subject.weight = clamped;
                entry.readout = clamped.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_major(&mut self, handle: EntryHandle, major: bool) -> bool {
        match self.entry_mut(handle) {
            Some(entry) => {
                entry.subject.major = major;
                true
            }
            None => false,
        }
    }

    fn position(&self, handle: EntryHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.handle == handle)
    }

    fn entry_mut(&mut self, handle: EntryHandle) -> Option<&mut SubjectEntry> {
        self.entries.iter_mut().find(|entry| entry.handle == handle)
    }
}
