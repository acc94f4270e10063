//! Credential entry model held by the list store.

use std::fmt;
use zeroize::Zeroizing;

/// Shown in place of an id the server has not handed back yet.
pub const PENDING_ID_LABEL: &str = "Reload to view id";

/// Password text; zeroed on drop and never rendered by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Server-assigned identifier of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Added in this session; the id becomes known on the next load.
    Pending,
    Assigned(String),
}

impl EntryId {
    pub fn is_pending(&self) -> bool {
        matches!(self, EntryId::Pending)
    }

    pub fn as_assigned(&self) -> Option<&str> {
        match self {
            EntryId::Assigned(id) => Some(id),
            EntryId::Pending => None,
        }
    }
}

impl From<Option<String>> for EntryId {
    fn from(id: Option<String>) -> Self {
        id.map_or(EntryId::Pending, EntryId::Assigned)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Pending => f.write_str(PENDING_ID_LABEL),
            EntryId::Assigned(id) => f.write_str(id),
        }
    }
}

/// Store-local identity of an entry. Never leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(pub(crate) u64);

/// The wire key used by the remove endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub username: String,
    pub url: String,
}

impl EntryKey {
    pub fn new(username: &str, url: &str) -> Self {
        Self {
            username: username.to_string(),
            url: url.to_string(),
        }
    }
}

/// Lifecycle of a logical entry as seen by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Absent,
    PendingAdd,
    Present,
    PendingRemove,
}

/// One stored credential.
///
/// Equality compares the credential fields and ignores the local handle, so
/// two loads of the same server list compare equal.
#[derive(Debug, Clone)]
pub struct CredentialEntry {
    handle: EntryHandle,
    id: EntryId,
    username: String,
    password: Secret,
    url: String,
}

impl CredentialEntry {
    pub(crate) fn new(
        handle: EntryHandle,
        id: EntryId,
        username: String,
        password: Secret,
        url: String,
    ) -> Self {
        Self {
            handle,
            id,
            username,
            password,
            url,
        }
    }

    pub fn handle(&self) -> EntryHandle {
        self.handle
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(&self.username, &self.url)
    }

    pub fn matches(&self, username: &str, url: &str) -> bool {
        self.username == username && self.url == url
    }
}

impl PartialEq for CredentialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.username == other.username
            && self.password == other.password
            && self.url == other.url
    }
}

impl Eq for CredentialEntry {}
