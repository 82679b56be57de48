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

//! Logical-to-physical state key resolution for shared state stores.
//!
//! When multiple applications share one physical state backend, raw logical
//! keys collide. This crate derives the physical storage key for a logical
//! key by applying a per-store, configurable prefix strategy, and reverses
//! the transform for keys read back from the backend.
//!
//! # Features
//!
//! - **Per-store strategies**: no prefix, application ID, store name,
//!   namespace-qualified application ID, or a fixed custom literal
//! - **Lossless**: every produced storage key recovers the exact logical key
//! - **Validated**: prefixes and keys containing the reserved `||` sequence
//!   are rejected before they can make recovery ambiguous
//! - **Thread-safe**: configuration writes and key resolutions may race
//!   freely without external locking
//!
//! # Usage
//!
//! ```ignore
//! use drasi_state_keyspace::{recover_logical_key, Keyspace};
//! use std::collections::HashMap;
//!
//! let keyspace = Keyspace::builder()
//!     .with_namespace("production")
//!     .with_store(
//!         "orders",
//!         HashMap::from([("keyPrefix".to_string(), "namespace".to_string())]),
//!     )
//!     .build()?;
//!
//! // Before any Get/Set/Delete against the backend:
//! let storage_key = keyspace.storage_key("order-42", "orders", "checkout")?;
//! assert_eq!(storage_key, "production.checkout||order-42");
//!
//! // For keys returned by a range or scan:
//! assert_eq!(recover_logical_key(&storage_key), "order-42");
//! ```

// ============================================================================
// Public Modules
// ============================================================================

/// Fluent builder for Keyspace instances
pub mod builder;

/// Error types for keyspace operations
pub mod error;

/// Key resolution between logical and storage keys
pub mod keyspace;

/// Per-store strategy registry
pub mod registry;

/// Key prefix strategies and the reserved key grammar
pub mod strategy;

// ============================================================================
// Public API
// ============================================================================

pub use builder::KeyspaceBuilder;
pub use error::{KeyspaceError, Result};
pub use keyspace::{recover_logical_key, recover_logical_keys, Keyspace};
pub use registry::StrategyRegistry;
pub use strategy::{KeyPrefixStrategy, KEY_PREFIX_FIELD, KEY_SEPARATOR};
