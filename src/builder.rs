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

//! Fluent builder for [`Keyspace`] instances.
//!
//! Store configurations added to the builder are validated when `build()`
//! runs, so a misconfigured store fails construction instead of its first
//! request.
//!
//! # Example
//!
//! ```ignore
//! use drasi_state_keyspace::Keyspace;
//! use std::collections::HashMap;
//!
//! let keyspace = Keyspace::builder()
//!     .with_namespace("production")
//!     .with_store(
//!         "orders",
//!         HashMap::from([("keyPrefix".to_string(), "namespace".to_string())]),
//!     )
//!     .build()?;
//! ```

use std::collections::HashMap;

use crate::error::Result;
use crate::keyspace::Keyspace;

/// Fluent builder for creating [`Keyspace`] instances.
///
/// Use `Keyspace::builder()` to get started.
pub struct KeyspaceBuilder {
    namespace: Option<String>,
    store_configs: Vec<(String, HashMap<String, String>)>,
}

impl Default for KeyspaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyspaceBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            namespace: None,
            store_configs: Vec::new(),
        }
    }

    /// Set the process namespace consumed by the namespace strategy.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a store configuration, registered when `build()` runs.
    ///
    /// The metadata map is the store's deployment descriptor properties;
    /// only the `keyPrefix` field is consulted, case-insensitively.
    pub fn with_store(
        mut self,
        store_name: impl Into<String>,
        metadata: HashMap<String, String>,
    ) -> Self {
        self.store_configs.push((store_name.into(), metadata));
        self
    }

    /// Build the keyspace, registering every added store configuration.
    ///
    /// # Errors
    ///
    /// Returns `KeyspaceError::InvalidConfiguration` if any added store
    /// carries a custom prefix containing the reserved `||` sequence.
    pub fn build(self) -> Result<Keyspace> {
        let keyspace = match self.namespace {
            Some(namespace) => Keyspace::with_namespace(namespace),
            None => Keyspace::new(),
        };
        for (store_name, metadata) in &self.store_configs {
            keyspace.configure_store(store_name, metadata)?;
        }
        Ok(keyspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyspaceError;
    use crate::strategy::KEY_PREFIX_FIELD;

    fn prefix_metadata(value: &str) -> HashMap<String, String> {
        HashMap::from([(KEY_PREFIX_FIELD.to_string(), value.to_string())])
    }

    #[test]
    fn test_builder_defaults_to_empty_namespace() {
        let keyspace = KeyspaceBuilder::new().build().unwrap();
        assert_eq!(keyspace.namespace(), "");
        assert!(keyspace.registry().is_empty());
    }

    #[test]
    fn test_builder_sets_namespace() {
        let keyspace = Keyspace::builder()
            .with_namespace("ns1")
            .build()
            .unwrap();
        assert_eq!(keyspace.namespace(), "ns1");
    }

    #[test]
    fn test_builder_registers_stores() {
        let keyspace = Keyspace::builder()
            .with_store("store1", prefix_metadata("none"))
            .with_store("store2", prefix_metadata("appid"))
            .build()
            .unwrap();

        assert!(keyspace.registry().contains("store1"));
        assert!(keyspace.registry().contains("store2"));
        assert_eq!(keyspace.registry().len(), 2);
    }

    #[test]
    fn test_builder_rejects_invalid_store_configuration() {
        let err = Keyspace::builder()
            .with_store("store1", prefix_metadata("a||b"))
            .build()
            .unwrap_err();
        assert!(matches!(err, KeyspaceError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_namespace_strategy_end_to_end() {
        let keyspace = Keyspace::builder()
            .with_namespace("ns1")
            .with_store("store7", prefix_metadata("namespace"))
            .build()
            .unwrap();

        let storage_key = keyspace
            .storage_key("state-key-1234567", "store7", "appid1")
            .unwrap();
        assert_eq!(storage_key, "ns1.appid1||state-key-1234567");
    }
}
