use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use panapp_store::StoreAdapter;
use panapp_types::{Client, Order, Product, RecordId};
use tracing::debug;

use crate::clock::MonotonicClock;
use crate::entity::Entity;

/// CRUD over one entity table.
///
/// Every mutation reads the full table from the adapter, applies the
/// change, and writes the full table back. The adapter is fail-soft, so
/// none of these operations can fail; a degraded backend silently costs
/// durability, not correctness of the returned records.
pub struct Repository<E: Entity> {
    store: StoreAdapter,
    clock: MonotonicClock,
    _entity: PhantomData<fn() -> E>,
}

/// Client records.
pub type ClientRepository = Repository<Client>;
/// Product records.
pub type ProductRepository = Repository<Product>;
/// Order records.
pub type OrderRepository = Repository<Order>;

impl<E: Entity> Repository<E> {
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            store,
            clock: MonotonicClock::new(),
            _entity: PhantomData,
        }
    }

    /// All persisted records, in insertion order.
    pub fn list(&self) -> Vec<E> {
        self.store.read_table(E::TABLE)
    }

    /// Create and persist a record from `draft`.
    ///
    /// Assigns a fresh id, sets `created_at = updated_at = now`, appends
    /// to the table, and returns the record exactly as persisted.
    pub fn create(&self, draft: E::Draft) -> E {
        let record = E::build(draft, RecordId::new(), self.clock.now());
        let mut table = self.list();
        table.push(record.clone());
        self.store.write_table(E::TABLE, &table);
        debug!(table = E::TABLE, id = %record.id(), "created record");
        record
    }

    /// Merge `patch` into the record with `id` and refresh its
    /// `updated_at`. Returns the persisted record, or `None` when no
    /// record carries that id (deliberately not an error: the reactive
    /// layer only passes ids it believes exist).
    pub fn update(&self, id: RecordId, patch: E::Patch) -> Option<E> {
        let mut table = self.list();
        let slot = table.iter_mut().find(|e| e.id() == id)?;
        slot.apply(patch);
        slot.touch(self.clock.now());
        let updated = slot.clone();
        self.store.write_table(E::TABLE, &table);
        Some(updated)
    }

    /// Remove the record with `id`, if present. Idempotent.
    pub fn remove(&self, id: RecordId) {
        let mut table = self.list();
        let before = table.len();
        table.retain(|e| e.id() != id);
        if table.len() != before {
            self.store.write_table(E::TABLE, &table);
        }
    }

    /// A timestamp from this repository's clock, for callers that mirror
    /// repository-computed times.
    pub fn operation_time(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl<E: Entity> std::fmt::Debug for Repository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("table", &E::TABLE)
            .finish_non_exhaustive()
    }
}
