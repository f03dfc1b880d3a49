//! Order-specific views on the [`OrdersStore`](crate::OrdersStore).
//!
//! Stats and filters are derived, not cached: each call folds the live
//! mirror once, so they cannot go stale.

use panapp_types::{Order, OrderPatch, OrderStats, OrderStatus, RecordId};

use crate::collection::CollectionStore;

impl CollectionStore<Order> {
    /// Write just the status field. Sugar over [`edit`](Self::edit).
    ///
    /// The store accepts any status value; the intended
    /// `pending -> in-progress -> completed` progression is enforced by
    /// whoever offers the actions (see [`OrderStatus::next`]).
    pub fn set_status(&mut self, id: RecordId, status: OrderStatus) {
        self.edit(
            id,
            OrderPatch {
                status: Some(status),
                ..Default::default()
            },
        );
    }

    /// Counts per status plus total, folded fresh from the mirror.
    pub fn stats(&self) -> OrderStats {
        self.entities().iter().map(|o| &o.status).collect()
    }

    /// All orders, or only those with the given status.
    pub fn filtered(&self, status: Option<OrderStatus>) -> Vec<Order> {
        match status {
            None => self.entities().to_vec(),
            Some(wanted) => self
                .entities()
                .iter()
                .filter(|o| o.status == wanted)
                .cloned()
                .collect(),
        }
    }
}
