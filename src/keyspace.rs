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

//! Key resolution between logical and storage keys.
//!
//! A [`Keyspace`] holds the process namespace and the per-store strategy
//! registry. The forward transform, [`Keyspace::storage_key`], derives the
//! physical key written to a shared backend; the backward transform,
//! [`recover_logical_key`], strips the prefix from keys read back. The
//! backward transform is a free function: keys returned by a range or scan
//! must be recoverable without knowing which strategy produced them.
//!
//! # Thread Safety
//!
//! `Keyspace` is safe for concurrent use. Configuration writes and key
//! resolutions may race freely; a resolution observes either the previous
//! or the new configuration of a store, never a partial write. Share an
//! instance between threads or tasks as `Arc<Keyspace>`.
//!
//! # Usage
//!
//! ```ignore
//! use drasi_state_keyspace::{recover_logical_key, Keyspace};
//! use std::collections::HashMap;
//!
//! let keyspace = Keyspace::with_namespace("production");
//!
//! let metadata = HashMap::from([("keyPrefix".to_string(), "appid".to_string())]);
//! keyspace.configure_store("orders", &metadata)?;
//!
//! let storage_key = keyspace.storage_key("order-42", "orders", "checkout")?;
//! assert_eq!(storage_key, "checkout||order-42");
//! assert_eq!(recover_logical_key(&storage_key), "order-42");
//! ```

use std::collections::HashMap;

use crate::builder::KeyspaceBuilder;
use crate::error::{KeyspaceError, Result};
use crate::registry::StrategyRegistry;
use crate::strategy::{KeyPrefixStrategy, KEY_SEPARATOR};

/// Resolves logical application keys to the physical keys of a shared,
/// multi-tenant state backend, and back.
///
/// The namespace is fixed at construction; per-store strategies are written
/// through [`Keyspace::configure_store`] and consulted on every resolution.
#[derive(Debug)]
pub struct Keyspace {
    /// Process-wide namespace, empty when unset. Consumed only by the
    /// namespace strategy.
    namespace: String,
    registry: StrategyRegistry,
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyspace {
    /// Create a keyspace with no namespace.
    pub fn new() -> Self {
        Self {
            namespace: String::new(),
            registry: StrategyRegistry::new(),
        }
    }

    /// Create a keyspace with a process namespace.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            registry: StrategyRegistry::new(),
        }
    }

    /// Fluent builder for a keyspace with pre-registered store
    /// configurations.
    pub fn builder() -> KeyspaceBuilder {
        KeyspaceBuilder::new()
    }

    /// The process namespace, or an empty string when unset.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The per-store strategy registry.
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Save the key prefix strategy for a store from its configuration
    /// metadata.
    ///
    /// The `keyPrefix` field is looked up case-insensitively; an absent or
    /// empty field selects the default strategy. Saving again for the same
    /// store overwrites the previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`KeyspaceError::InvalidConfiguration`] if a custom prefix
    /// value contains the reserved `||` sequence; the store's previous
    /// configuration, if any, stays in effect.
    pub fn configure_store(
        &self,
        store_name: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<()> {
        self.registry.save_configuration(store_name, metadata)
    }

    /// Resolve the storage key for a logical key.
    ///
    /// Looks up the store's strategy (an unconfigured store behaves as
    /// [`KeyPrefixStrategy::Default`]), derives the prefix, and joins it to
    /// the logical key with the reserved `||` sequence. When the derived
    /// prefix is empty the logical key is returned unchanged, with no
    /// separator inserted.
    ///
    /// Only the two-character sequence is reserved: single `|` characters
    /// pass validation and can form the sequence where the prefix meets the
    /// key (see [`recover_logical_key`]).
    ///
    /// # Errors
    ///
    /// Returns [`KeyspaceError::InvalidKey`] if the logical key contains the
    /// reserved `||` sequence. Strategy resolution itself never fails.
    pub fn storage_key(
        &self,
        logical_key: &str,
        store_name: &str,
        app_id: &str,
    ) -> Result<String> {
        if logical_key.contains(KEY_SEPARATOR) {
            return Err(KeyspaceError::invalid_key(logical_key));
        }

        let strategy = self.registry.strategy_for(store_name);
        let prefix = self.prefix_for(&strategy, store_name, app_id);
        Ok(join_key(&prefix, logical_key))
    }

    /// Resolve storage keys for a batch of logical keys ahead of a bulk
    /// backend operation.
    ///
    /// The store's strategy is resolved once for the whole batch and the
    /// result preserves input order.
    ///
    /// # Errors
    ///
    /// Returns [`KeyspaceError::InvalidKey`] for the first logical key
    /// containing the reserved `||` sequence; no keys are returned for a
    /// batch holding a malformed key.
    pub fn storage_keys(
        &self,
        logical_keys: &[&str],
        store_name: &str,
        app_id: &str,
    ) -> Result<Vec<String>> {
        let strategy = self.registry.strategy_for(store_name);
        let prefix = self.prefix_for(&strategy, store_name, app_id);

        let mut storage_keys = Vec::with_capacity(logical_keys.len());
        for logical_key in logical_keys {
            if logical_key.contains(KEY_SEPARATOR) {
                return Err(KeyspaceError::invalid_key(*logical_key));
            }
            storage_keys.push(join_key(&prefix, logical_key));
        }
        Ok(storage_keys)
    }

    fn prefix_for(
        &self,
        strategy: &KeyPrefixStrategy,
        store_name: &str,
        app_id: &str,
    ) -> String {
        match strategy {
            KeyPrefixStrategy::None => String::new(),
            KeyPrefixStrategy::AppId | KeyPrefixStrategy::Default => app_id.to_string(),
            KeyPrefixStrategy::StoreName => store_name.to_string(),
            KeyPrefixStrategy::Namespace => {
                // No prefix without an application identity, regardless of
                // the namespace.
                if app_id.is_empty() {
                    String::new()
                } else if self.namespace.is_empty() {
                    app_id.to_string()
                } else {
                    format!("{}.{app_id}", self.namespace)
                }
            }
            KeyPrefixStrategy::Custom(literal) => literal.clone(),
        }
    }
}

fn join_key(prefix: &str, logical_key: &str) -> String {
    if prefix.is_empty() {
        logical_key.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{logical_key}")
    }
}

/// Recover the logical key from a storage key.
///
/// Splits on the first occurrence of the reserved `||` sequence and returns
/// everything after it; a storage key without the sequence is returned
/// unchanged. Works on keys produced by any strategy without knowing which
/// strategy produced them, and never fails.
///
/// Single `|` characters are not reserved, so a custom prefix ending in `|`
/// joined to a logical key starting with `|` forms the sequence at the
/// boundary and the split lands before the original join.
pub fn recover_logical_key(storage_key: &str) -> &str {
    match storage_key.split_once(KEY_SEPARATOR) {
        Some((_, logical_key)) => logical_key,
        None => storage_key,
    }
}

/// Recover the logical keys from a batch of storage keys returned by a
/// range or scan operation.
pub fn recover_logical_keys(storage_keys: &[String]) -> Vec<String> {
    storage_keys
        .iter()
        .map(|storage_key| recover_logical_key(storage_key).to_string())
        .collect()
}
