pub mod modal;
pub mod response;
pub mod sequence;
pub mod slot_parser;
pub mod subject_list;
pub mod view;

pub use crate::domain::model::{EntryHandle, Notice, NoticeLevel, Subject};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore, Notifier, ScheduleBackend};
pub use crate::utils::error::Result;
