pub mod clipboard;
pub mod entry;
pub mod notify;
pub mod remote;
pub mod store;
