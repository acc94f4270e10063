//! In-memory credential list kept in step with the remote credential service.
//!
//! The store is the single source of truth for the session's entries. Every
//! mutation happens only after the remote service confirms it; a failed
//! operation leaves the list exactly as it was and raises a notification.
//!
//! Operations on the same `(username, url)` key do not overlap: while one is in
//! flight, a second `add` or `remove` on that key is rejected with
//! [`StoreError::OperationInFlight`] without reaching the network.

use crate::api::models::WireCredential;
use crate::core::clipboard::{ClipboardSink, MemoryClipboard};
use crate::core::entry::{CredentialEntry, EntryHandle, EntryId, EntryKey, EntryState, Secret};
use crate::core::notify::{Notification, Notifier};
use crate::core::remote::RemoteCredentialService;
use crate::error::StoreError;
use crate::utils::validation::validate_username;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct StoreState {
    entries: Vec<CredentialEntry>,
    in_flight: HashMap<EntryKey, EntryState>,
    next_handle: u64,
    /// Bumped by every successful load
    generation: u64,
}

impl StoreState {
    fn admit(
        &mut self,
        id: EntryId,
        username: String,
        password: Secret,
        url: String,
    ) -> CredentialEntry {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;
        let entry = CredentialEntry::new(handle, id, username, password, url);
        self.entries.push(entry.clone());
        entry
    }

    fn replace_all(&mut self, records: Vec<WireCredential>) {
        self.generation += 1;
        self.entries.clear();
        let mut seen_ids = HashSet::new();
        for record in records {
            if let Some(id) = &record.id {
                if !seen_ids.insert(id.clone()) {
                    log::warn!("Dropping duplicate credential id '{}' from list response", id);
                    continue;
                }
            }
            self.admit(
                record.id.into(),
                record.username,
                Secret::new(record.password),
                record.url,
            );
        }
    }

    fn position(&self, handle: EntryHandle) -> Option<usize> {
        self.entries.iter().position(|e| e.handle() == handle)
    }

    /// Find `entry` by handle, or by id (fields for pending ids) after a reload.
    fn locate(&self, entry: &CredentialEntry) -> Option<usize> {
        self.position(entry.handle()).or_else(|| match entry.id().as_assigned() {
            Some(id) => self
                .entries
                .iter()
                .position(|e| e.id().as_assigned() == Some(id)),
            None => self.entries.iter().position(|e| {
                is_copy(e, entry.username(), entry.password().expose(), entry.url())
            }),
        })
    }

    fn copies_of(&self, username: &str, password: &str, url: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| is_copy(e, username, password, url))
            .count()
    }

    fn latest_copy(&self, username: &str, password: &str, url: &str) -> Option<CredentialEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| is_copy(e, username, password, url))
            .cloned()
    }
}

fn is_copy(entry: &CredentialEntry, username: &str, password: &str, url: &str) -> bool {
    entry.matches(username, url) && entry.password().expose() == password
}

/// Clears an in-flight marker when the operation finishes or is dropped.
struct InFlight<'a> {
    state: &'a Mutex<StoreState>,
    key: EntryKey,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock_state(self.state).in_flight.remove(&self.key);
    }
}

fn lock_state(state: &Mutex<StoreState>) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct CredentialListStore<R> {
    remote: R,
    notifier: Arc<dyn Notifier>,
    clipboard: Mutex<Box<dyn ClipboardSink>>,
    state: Mutex<StoreState>,
}

impl<R> CredentialListStore<R>
where
    R: RemoteCredentialService,
{
    pub fn new(remote: R, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            remote,
            notifier,
            clipboard: Mutex::new(Box::new(MemoryClipboard::new())),
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Mutex::new(clipboard);
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        lock_state(&self.state)
    }

    fn fail<T>(&self, error: StoreError) -> Result<T, StoreError> {
        self.notifier.notify(Notification::from_store_error(&error));
        Err(error)
    }

    /// Mark `key` as busy, or fail if another operation already holds it.
    fn begin(&self, key: EntryKey, pending: EntryState) -> Result<InFlight<'_>, StoreError> {
        let mut state = self.lock();
        if state.in_flight.contains_key(&key) {
            drop(state);
            return self.fail(StoreError::OperationInFlight {
                username: key.username,
                url: key.url,
            });
        }
        state.in_flight.insert(key.clone(), pending);
        Ok(InFlight {
            state: &self.state,
            key,
        })
    }

    /// Replace the contents with the server's list. Returns the entry count.
    pub async fn load(&self) -> Result<usize, StoreError> {
        match self.remote.fetch_all().await {
            Ok(records) => {
                let mut state = self.lock();
                state.replace_all(records);
                log::debug!("Loaded {} credentials", state.entries.len());
                Ok(state.entries.len())
            }
            Err(e) => {
                log::debug!("Load failed: {}", e.detail());
                self.fail(e.into())
            }
        }
    }

    /// Submit a new credential and append it once the service accepts it.
    ///
    /// The returned entry has a pending id until the next [`load`](Self::load).
    pub async fn add(
        &self,
        username: &str,
        password: &str,
        url: &str,
    ) -> Result<CredentialEntry, StoreError> {
        if let Err(e) = validate_username(username) {
            return self.fail(e);
        }

        let in_flight = self.begin(EntryKey::new(username, url), EntryState::PendingAdd)?;
        let (generation, copies) = {
            let state = self.lock();
            (state.generation, state.copies_of(username, password, url))
        };
        let result = self.remote.add(username, password, url).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                let mut state = self.lock();
                // A reload that landed meanwhile may already list the new row
                let reloaded = state.generation != generation
                    && state.copies_of(username, password, url) > copies;
                let entry = match reloaded
                    .then(|| state.latest_copy(username, password, url))
                    .flatten()
                {
                    Some(entry) => {
                        log::debug!("Added credential already listed by a reload");
                        entry
                    }
                    None => state.admit(
                        EntryId::Pending,
                        username.to_string(),
                        Secret::new(password),
                        url.to_string(),
                    ),
                };
                drop(state);
                log::debug!("Added credential for '{}' at '{}'", username, url);
                self.notifier.notify(Notification::saved());
                Ok(entry)
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Delete `entry` remotely and drop it from the list on confirmation.
    ///
    /// The entry is found by its store handle, or by id if a reload replaced
    /// it meanwhile. The delete request itself is keyed by username and url,
    /// so the backend may drop every row sharing that pair; locally only the
    /// selected entry is removed.
    pub async fn remove(&self, entry: &CredentialEntry) -> Result<(), StoreError> {
        if self.lock().locate(entry).is_none() {
            return self.fail(StoreError::EntryNotFound);
        }

        let in_flight = self.begin(entry.key(), EntryState::PendingRemove)?;
        let result = self.remote.remove(entry.username(), entry.url()).await;
        drop(in_flight);

        match result {
            Ok(()) => {
                let mut state = self.lock();
                match state.locate(entry) {
                    Some(index) => {
                        state.entries.remove(index);
                    }
                    None => log::debug!("Removed entry was already gone after a reload"),
                }
                drop(state);
                log::debug!(
                    "Removed credential for '{}' at '{}'",
                    entry.username(),
                    entry.url()
                );
                self.notifier.notify(Notification::deleted());
                Ok(())
            }
            Err(e) => self.fail(e.into()),
        }
    }

    /// Snapshot of the current entries; no remote call.
    pub fn list(&self) -> Vec<CredentialEntry> {
        self.lock().entries.clone()
    }

    /// Put the entry's password on the clipboard and notify "Copied!".
    ///
    /// A failing sink is logged; the copy is still reported.
    pub fn copy_secret(&self, entry: &CredentialEntry) -> Result<(), StoreError> {
        let secret = {
            let state = self.lock();
            match state.locate(entry) {
                Some(index) => state.entries[index].password().clone(),
                None => {
                    drop(state);
                    return self.fail(StoreError::EntryNotFound);
                }
            }
        };

        let copied = self
            .clipboard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_text(secret.expose());

        if let Err(e) = copied {
            log::warn!("Clipboard write failed: {}", e);
        }
        self.notifier.notify(Notification::copied());
        Ok(())
    }

    pub fn state_of(&self, username: &str, url: &str) -> EntryState {
        let state = self.lock();
        if let Some(pending) = state.in_flight.get(&EntryKey::new(username, url)) {
            return *pending;
        }
        if state.entries.iter().any(|e| e.matches(username, url)) {
            EntryState::Present
        } else {
            EntryState::Absent
        }
    }

    /// Every entry stored under `(username, url)`, in list order.
    pub fn find(&self, username: &str, url: &str) -> Vec<CredentialEntry> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.matches(username, url))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}
