//! # keycloud-core
//!
//! Client-side core of the keycloud password manager.
//!
//! The crate keeps the session's credential list in memory and reconciles it
//! with the keycloud backend over HTTP. It is shared by the `keycloud` CLI and
//! any other front end that needs the same list semantics.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use keycloud_core::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> keycloud_core::Result<()> {
//!     let client = KeycloudClient::new("http://localhost:8080".to_string())?;
//!     let store = CredentialListStore::new(client, Arc::new(RecordingNotifier::new()));
//!
//!     store.load().await?;
//!     store.add("Mark", "p1", "https://example.com").await?;
//!     for entry in store.list() {
//!         println!("{} {}", entry.username(), entry.url());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, wire records
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Credential list store, notifications
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  config.toml, session token lookup
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Validation, logging, error helpers
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::{ApiError, AppError, StoreError};

    pub use crate::api::client::KeycloudClient;
    pub use crate::api::models::WireCredential;

    pub use crate::core::clipboard::{ClipboardError, ClipboardSink, MemoryClipboard};
    pub use crate::core::entry::{CredentialEntry, EntryId, EntryState, Secret};
    pub use crate::core::notify::{Notification, Notifier, RecordingNotifier};
    pub use crate::core::remote::RemoteCredentialService;
    pub use crate::core::store::CredentialListStore;

    pub use crate::storage::config::Config;
    pub use crate::storage::credentials::get_session_token;
}

/// Business logic layer - the credential list store and its collaborators.
pub mod core;

/// Storage layer - configuration and session token lookup.
pub mod storage;

/// Utilities layer - validation, logging, text helpers.
pub mod utils;

/// API layer - HTTP client and wire records.
pub mod api;

/// Display layer - terminal table rendering.
pub mod display;

/// Error handling - hierarchical error system with troubleshooting hints.
pub mod error;

pub type Result<T> = std::result::Result<T, AppError>;
