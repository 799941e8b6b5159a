use crate::domain::model::{Notice, NoticeLevel};
use crate::domain::ports::Notifier;

/// Prints notices to the terminal and mirrors them to the log.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

pub fn format_notice(notice: &Notice) -> String {
    let symbol = match notice.level {
        NoticeLevel::Info => "ℹ️",
        NoticeLevel::Success => "✅",
        NoticeLevel::Warning => "⚠️",
        NoticeLevel::Error => "❌",
    };
    format!("{} {}", symbol, notice.message)
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => tracing::debug!("notice: {}", notice.message),
            NoticeLevel::Warning => tracing::warn!("notice: {}", notice.message),
            NoticeLevel::Error => tracing::error!("notice: {}", notice.message),
        }
        println!("{}", format_notice(&notice));
    }
}
