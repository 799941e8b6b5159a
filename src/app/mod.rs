pub mod form;
pub mod page;
pub mod remote_loader;
pub mod stored_loader;
