//! Key-value storage used to persist the conversation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::rc::Rc;

/// The key the conversation is stored under.
///
/// It's not configurable, so every widget on the same origin shares one
/// stored conversation.
pub const STORAGE_KEY: &str = "popchat-conversation";

/// The kind of storage operation that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Reading an entry failed.
    Read,
    /// Writing an entry failed (quota exceeded, storage disabled, etc.)
    Write,
    /// Removing an entry failed.
    Remove,
}

/// Describes a storage failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreError {
    kind: StoreErrorKind,
    reason: String,
}

impl StoreError {
    /// Creates a new error.
    #[inline]
    pub fn new<S: Into<String>>(kind: StoreErrorKind, reason: S) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            StoreErrorKind::Read => "read",
            StoreErrorKind::Write => "write",
            StoreErrorKind::Remove => "remove",
        };
        write!(f, "failed to {op} stored entry: {}", self.reason)
    }
}

impl StdError for StoreError {}

/// A string key-value store, such as the browser's session storage.
pub trait KeyValueStore {
    /// Reads the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing a missing key is fine.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    #[inline]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    #[inline]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// A store that lives as long as the process (or the page).
///
/// Used when no real storage is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
