//! Foundation types for the panapp bakery-management core.
//!
//! Every record that crosses the persistence boundary lives here:
//!
//! - [`RecordId`] -- UUID v7 record identifier
//! - [`User`] / [`Credential`] -- public identity and its stored counterpart
//! - [`Client`] -- customer records
//! - [`Product`] -- catalog items priced in COP
//! - [`Order`] -- orders with a [`OrderStatus`] state machine and derived
//!   [`OrderStats`]
//!
//! Records serialize to the camelCase JSON layout of the durable store
//! (`createdAt`, `customerName`, `priceCOP`, ...). Each entity comes with a
//! draft type (caller-supplied fields for creation) and a patch type
//! (partial update); identifiers and timestamps are assigned by the
//! repository layer, never by callers.

pub mod client;
pub mod error;
pub mod id;
pub mod order;
pub mod product;
pub mod user;

pub use client::{Client, ClientPatch, NewClient};
pub use error::TypeError;
pub use id::RecordId;
pub use order::{NewOrder, Order, OrderPatch, OrderStats, OrderStatus};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{Credential, User};
