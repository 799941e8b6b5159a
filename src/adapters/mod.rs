// Adapters layer: concrete implementations for external systems (http, storage, notices).

pub mod http;
pub mod notifier;
pub mod storage;
