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

//! Per-store strategy registry.
//!
//! Holds the validated key prefix strategy for every configured store.
//! Written by configuration saves, read by every key resolution. Entries
//! live for the process lifetime; there is no deletion API.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;

use crate::error::{KeyspaceError, Result};
use crate::strategy::{KeyPrefixStrategy, KEY_PREFIX_FIELD, KEY_SEPARATOR};

/// Registry mapping store names to their validated key prefix strategies.
///
/// Store names are matched case-sensitively. A store without an entry
/// resolves as [`KeyPrefixStrategy::Default`].
///
/// # Thread Safety
///
/// Safe for concurrent use. Entries are replaced whole under a write lock,
/// so a concurrent reader observes either the previous or the new strategy
/// for a store, never a partial write. No operation blocks on I/O and
/// lookups never fail.
#[derive(Debug)]
pub struct StrategyRegistry {
    strategies: RwLock<HashMap<String, KeyPrefixStrategy>>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            strategies: RwLock::new(HashMap::new()),
        }
    }

    /// Save the key prefix strategy for a store from its configuration
    /// metadata.
    ///
    /// The `keyPrefix` field is looked up case-insensitively; an absent or
    /// empty field records [`KeyPrefixStrategy::Default`]. Saving again for
    /// the same store overwrites the previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`KeyspaceError::InvalidConfiguration`] if a custom prefix
    /// value contains the reserved `||` sequence. The previous entry, if
    /// any, is left unchanged.
    pub fn save_configuration(
        &self,
        store_name: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<()> {
        let token = metadata
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(KEY_PREFIX_FIELD))
            .map(|(_, value)| value.as_str())
            .unwrap_or("");
        let strategy = KeyPrefixStrategy::from_token(token);

        if let KeyPrefixStrategy::Custom(literal) = &strategy {
            if literal.contains(KEY_SEPARATOR) {
                return Err(KeyspaceError::invalid_configuration(store_name, literal));
            }
        }

        self.strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(store_name.to_string(), strategy.clone());

        debug!("Configured key prefix strategy '{strategy}' for store '{store_name}'");
        Ok(())
    }

    /// Get the strategy for a store, or [`KeyPrefixStrategy::Default`] when
    /// the store was never configured.
    pub fn strategy_for(&self, store_name: &str) -> KeyPrefixStrategy {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(store_name)
            .cloned()
            .unwrap_or(KeyPrefixStrategy::Default)
    }

    /// Check whether a store has an explicit configuration entry.
    pub fn contains(&self, store_name: &str) -> bool {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(store_name)
    }

    /// Names of all configured stores, in no particular order.
    pub fn store_names(&self) -> Vec<String> {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of configured stores.
    pub fn len(&self) -> usize {
        self.strategies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no store has been configured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(field: &str, value: &str) -> HashMap<String, String> {
        HashMap::from([(field.to_string(), value.to_string())])
    }

    #[test]
    fn test_save_configuration_records_strategy() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store2", &metadata(KEY_PREFIX_FIELD, "appid"))
            .unwrap();

        assert_eq!(registry.strategy_for("store2"), KeyPrefixStrategy::AppId);
        assert!(registry.contains("store2"));
    }

    #[test]
    fn test_save_configuration_absent_field_records_default() {
        let registry = StrategyRegistry::new();

        registry.save_configuration("store6", &HashMap::new()).unwrap();

        assert_eq!(registry.strategy_for("store6"), KeyPrefixStrategy::Default);
        assert!(registry.contains("store6"));
    }

    #[test]
    fn test_save_configuration_empty_value_records_default() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store7", &metadata(KEY_PREFIX_FIELD, ""))
            .unwrap();

        assert_eq!(registry.strategy_for("store7"), KeyPrefixStrategy::Default);
    }

    #[test]
    fn test_save_configuration_field_name_case_insensitive() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store4", &metadata("KEYPREFIX", "storename"))
            .unwrap();

        assert_eq!(registry.strategy_for("store4"), KeyPrefixStrategy::StoreName);
    }

    #[test]
    fn test_save_configuration_custom_literal() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store5", &metadata(KEY_PREFIX_FIELD, "other-fixed-prefix"))
            .unwrap();

        assert_eq!(
            registry.strategy_for("store5"),
            KeyPrefixStrategy::Custom("other-fixed-prefix".to_string())
        );
    }

    #[test]
    fn test_save_configuration_overwrites_previous_entry() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store1", &metadata(KEY_PREFIX_FIELD, "appid"))
            .unwrap();
        registry
            .save_configuration("store1", &metadata(KEY_PREFIX_FIELD, "storename"))
            .unwrap();

        assert_eq!(registry.strategy_for("store1"), KeyPrefixStrategy::StoreName);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_save_configuration_rejects_separator_in_custom_prefix() {
        let registry = StrategyRegistry::new();

        let err = registry
            .save_configuration("statestore01", &metadata(KEY_PREFIX_FIELD, "a||b"))
            .unwrap_err();

        assert!(matches!(err, KeyspaceError::InvalidConfiguration { .. }));
        assert!(!registry.contains("statestore01"));
    }

    #[test]
    fn test_rejected_save_keeps_previous_entry() {
        let registry = StrategyRegistry::new();

        registry
            .save_configuration("store1", &metadata(KEY_PREFIX_FIELD, "tenant-7"))
            .unwrap();
        registry
            .save_configuration("store1", &metadata(KEY_PREFIX_FIELD, "a||b"))
            .unwrap_err();

        assert_eq!(
            registry.strategy_for("store1"),
            KeyPrefixStrategy::Custom("tenant-7".to_string())
        );
    }

    #[test]
    fn test_strategy_for_unconfigured_store_is_default() {
        let registry = StrategyRegistry::new();

        assert_eq!(registry.strategy_for("store999"), KeyPrefixStrategy::Default);
        assert!(!registry.contains("store999"));
    }

    #[test]
    fn test_store_names_and_len() {
        let registry = StrategyRegistry::new();
        assert!(registry.is_empty());

        registry
            .save_configuration("store1", &metadata(KEY_PREFIX_FIELD, "none"))
            .unwrap();
        registry
            .save_configuration("store2", &metadata(KEY_PREFIX_FIELD, "appid"))
            .unwrap();

        let mut names = registry.store_names();
        names.sort();
        assert_eq!(names, vec!["store1", "store2"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }
}
