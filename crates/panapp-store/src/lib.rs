//! Durable key-value text storage for the panapp core.
//!
//! The persistence model is deliberately small: one entry per logical
//! table, each value a JSON-encoded array or object, addressed by a string
//! key (`clients.table`, `user.credentials`, ...). Collections are small
//! and mutation frequency is low, so every mutation rewrites its whole
//! table.
//!
//! # Backends
//!
//! All backends implement the [`KeyValueStore`] trait and propagate their
//! failures as [`StoreError`]:
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and ephemeral runs
//! - [`FileKvStore`] -- one JSON file per key under a root directory
//!
//! # The fail-soft boundary
//!
//! Callers above this crate never see a storage failure. [`StoreAdapter`]
//! wraps a backend and degrades every failure to a safe default: reads
//! come back absent, writes and removes become no-ops, and the failure is
//! logged. A broken disk must not take the session down; the in-memory
//! state above remains the source of truth until the process exits.

pub mod adapter;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use adapter::StoreAdapter;
pub use error::{StoreError, StoreResult};
pub use file::FileKvStore;
pub use memory::InMemoryKvStore;
pub use traits::KeyValueStore;
