// SPDX-License-Identifier: MPL-2.0
//! Persistent key/value storage port.
//!
//! A deliberately small string-keyed contract: the favorites store keeps one
//! serialized document under a reserved key. Adapters live in
//! `infrastructure::storage`.

use crate::error::Result;

/// String-keyed persistent storage.
///
/// # Errors
///
/// Both operations may fail (storage disabled, quota exceeded, I/O error).
/// Callers decide how to degrade; the port only reports.
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
