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

//! Key prefix strategies and the reserved key grammar.
//!
//! A storage key joins a derived prefix to the logical key with the
//! reserved [`KEY_SEPARATOR`] sequence. The prefix is derived per store
//! from a [`KeyPrefixStrategy`], classified once from the store's
//! configuration metadata and dispatched on for every key resolved
//! afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved sequence separating the prefix from the logical key inside a
/// storage key. Must never appear in a logical key or a custom prefix.
pub const KEY_SEPARATOR: &str = "||";

/// Configuration metadata field selecting a store's key prefix strategy.
/// Matched case-insensitively when the configuration is saved.
pub const KEY_PREFIX_FIELD: &str = "keyPrefix";

/// Per-store policy for deriving the prefix of a storage key.
///
/// Serialized forms round-trip through the raw configuration token
/// (`"appid"`, `"storename"`, or the custom literal verbatim).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum KeyPrefixStrategy {
    /// No prefix; the storage key is the logical key unchanged.
    None,

    /// The calling application's ID prefixes the key.
    AppId,

    /// Legacy behavior, also applied to unconfigured stores; prefixes with
    /// the application ID like [`KeyPrefixStrategy::AppId`].
    Default,

    /// The store's own name prefixes the key.
    StoreName,

    /// The process namespace and the application ID prefix the key as
    /// `namespace.app_id`.
    Namespace,

    /// A fixed literal, recorded when the configuration was saved,
    /// prefixes the key (for extensibility).
    Custom(String),
}

impl KeyPrefixStrategy {
    /// Classify a configuration token into a strategy.
    ///
    /// The five recognized tokens are matched case-insensitively. An empty
    /// token selects [`KeyPrefixStrategy::Default`]; any other value is a
    /// custom literal, kept with its original casing.
    pub fn from_token(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "" | "default" => KeyPrefixStrategy::Default,
            "none" => KeyPrefixStrategy::None,
            "appid" => KeyPrefixStrategy::AppId,
            "storename" => KeyPrefixStrategy::StoreName,
            "namespace" => KeyPrefixStrategy::Namespace,
            _ => KeyPrefixStrategy::Custom(token.to_string()),
        }
    }

    /// The configuration token form of this strategy.
    pub fn token(&self) -> &str {
        match self {
            KeyPrefixStrategy::None => "none",
            KeyPrefixStrategy::AppId => "appid",
            KeyPrefixStrategy::Default => "default",
            KeyPrefixStrategy::StoreName => "storename",
            KeyPrefixStrategy::Namespace => "namespace",
            KeyPrefixStrategy::Custom(literal) => literal,
        }
    }
}

impl fmt::Display for KeyPrefixStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<String> for KeyPrefixStrategy {
    fn from(token: String) -> Self {
        KeyPrefixStrategy::from_token(&token)
    }
}

impl From<KeyPrefixStrategy> for String {
    fn from(strategy: KeyPrefixStrategy) -> Self {
        match strategy {
            KeyPrefixStrategy::Custom(literal) => literal,
            other => other.token().to_string(),
        }
    }
}
