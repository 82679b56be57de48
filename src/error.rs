// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for keyspace operations.
//!
//! Public API methods return [`Result<T>`] with structured [`KeyspaceError`]
//! variants that callers can pattern match on. Both failures are
//! deterministic validation errors, never transient: one is raised when a
//! store configuration is saved, the other when a logical key is resolved.

use thiserror::Error;

/// Main error type for keyspace operations.
#[derive(Error, Debug)]
pub enum KeyspaceError {
    /// A configured custom key prefix contains the reserved `||` sequence.
    ///
    /// Raised when the configuration is saved, so a bad deployment fails
    /// before any request traffic reaches the store.
    #[error("Invalid key prefix '{prefix}' for store '{store}': contains the reserved sequence '||'")]
    InvalidConfiguration {
        /// The store the configuration was written for
        store: String,
        /// The rejected prefix value
        prefix: String,
    },

    /// A logical key contains the reserved `||` sequence.
    ///
    /// Raised when the key is resolved. Such a key would be
    /// indistinguishable from a prefixed key when read back.
    #[error("Invalid key '{key}': contains the reserved sequence '||'")]
    InvalidKey {
        /// The rejected logical key
        key: String,
    },
}

impl KeyspaceError {
    /// Create an invalid configuration error.
    pub fn invalid_configuration(store: impl Into<String>, prefix: impl Into<String>) -> Self {
        KeyspaceError::InvalidConfiguration {
            store: store.into(),
            prefix: prefix.into(),
        }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        KeyspaceError::InvalidKey { key: key.into() }
    }
}

/// Result type for keyspace operations.
pub type Result<T> = std::result::Result<T, KeyspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = KeyspaceError::invalid_configuration("store1", "a||b");
        assert_eq!(
            err.to_string(),
            "Invalid key prefix 'a||b' for store 'store1': contains the reserved sequence '||'"
        );
    }

    #[test]
    fn test_invalid_key_display() {
        let err = KeyspaceError::invalid_key("c||d");
        assert_eq!(
            err.to_string(),
            "Invalid key 'c||d': contains the reserved sequence '||'"
        );
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = KeyspaceError::invalid_configuration("store1", "a||b");

        match err {
            KeyspaceError::InvalidConfiguration { store, prefix } => {
                assert_eq!(store, "store1");
                assert_eq!(prefix, "a||b");
            }
            _ => panic!("Expected InvalidConfiguration variant"),
        }
    }
}
