use crate::domain::model::Notice;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Status and raw body of one backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    /// `POST /process_timetable`，表單欄位 `new_url`
    async fn process_timetable(&self, url: &str) -> Result<RawResponse>;

    /// `GET /load_stored_timetable`
    async fn load_stored_timetable(&self) -> Result<RawResponse>;

    /// `POST /plan`，依序送出表單欄位
    async fn submit_plan(&self, fields: &[(String, String)]) -> Result<RawResponse>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn process_path(&self) -> &str;
    fn stored_path(&self) -> &str;
    fn plan_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn storage_path(&self) -> &str;
    fn total_hours_key(&self) -> &str;
}
