//! Reactive in-memory stores for the panapp core.
//!
//! Each store exclusively owns the in-memory mirror of one durable table
//! and mutates it write-through: persist first via the repository, then
//! reflect the persisted record in memory. Because execution is
//! single-threaded and synchronous end-to-end, in-memory state never
//! outruns durable state under normal operation; when persistence fails
//! soft, memory keeps going and the session merely loses durability.
//!
//! The observation contract is poll-based: every mutation bumps a
//! [`revision`](collection::CollectionStore::revision) counter, and the
//! collaborator re-queries when it changes.
//!
//! - [`CollectionStore`] -- generic mirror with `add`/`edit`/`remove`
//! - [`ClientsStore`] / [`ProductsStore`] / [`OrdersStore`] -- the three
//!   collections; orders additionally expose `set_status`, `stats`, and
//!   `filtered`
//! - [`AuthState`] -- session user lifecycle over the credential subsystem
//! - [`AppState`] -- the one handle a collaborator holds

pub mod app;
pub mod auth;
pub mod collection;
pub mod orders;

pub use app::AppState;
pub use auth::AuthState;
pub use collection::{ClientsStore, CollectionStore, OrdersStore, ProductsStore};
