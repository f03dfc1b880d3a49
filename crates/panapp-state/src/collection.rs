use panapp_repo::{Entity, Repository};
use panapp_store::StoreAdapter;
use panapp_types::{Client, Order, Product, RecordId};

/// In-memory reactive mirror of one entity table.
///
/// Holds `{ entities, is_loading }` plus a revision counter. Mutations are
/// write-through: the repository persists first, then the mirror reflects
/// the persisted record, so both sides carry identical ids and
/// timestamps. Lookups are linear; the collections stay small.
pub struct CollectionStore<E: Entity> {
    repo: Repository<E>,
    entities: Vec<E>,
    is_loading: bool,
    revision: u64,
}

/// The clients collection.
pub type ClientsStore = CollectionStore<Client>;
/// The products collection.
pub type ProductsStore = CollectionStore<Product>;
/// The orders collection; see [`crate::orders`] for its extras.
pub type OrdersStore = CollectionStore<Order>;

impl<E: Entity> CollectionStore<E> {
    /// A store that has not loaded yet (`is_loading` is set until
    /// [`init`](Self::init) runs).
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            repo: Repository::new(store),
            entities: Vec::new(),
            is_loading: true,
            revision: 0,
        }
    }

    /// Load the persisted table into memory. A failed or empty load
    /// degrades to an empty collection; either way `is_loading` clears.
    pub fn init(&mut self) {
        self.entities = self.repo.list();
        self.is_loading = false;
        self.revision += 1;
    }

    /// The mirrored records, in insertion order.
    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    /// `true` until the first [`init`](Self::init) completes.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Bumped on every change to the mirror; the collaborator's poll
    /// contract.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Linear lookup by id.
    pub fn find_by_id(&self, id: RecordId) -> Option<&E> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Persist a new record, then append it to the mirror. The append
    /// proceeds even when persistence degraded: durability becomes
    /// at-most-session, the session itself keeps working.
    pub fn add(&mut self, draft: E::Draft) -> E {
        let record = self.repo.create(draft);
        self.entities.push(record.clone());
        self.revision += 1;
        record
    }

    /// Write a partial update through the repository, then mirror the
    /// persisted record. Unknown ids are a no-op.
    pub fn edit(&mut self, id: RecordId, patch: E::Patch) {
        let persisted = self.repo.update(id, patch.clone());
        let Some(slot) = self.entities.iter_mut().find(|e| e.id() == id) else {
            return;
        };
        match persisted {
            Some(record) => *slot = record,
            // The durable table no longer has the record (degraded
            // persistence); patch the mirror directly so the session
            // keeps moving, stamped with the same clock the repository
            // would have used.
            None => {
                slot.apply(patch);
                slot.touch(self.repo.operation_time());
            }
        }
        self.revision += 1;
    }

    /// Remove from the durable table and the mirror. Idempotent.
    pub fn remove(&mut self, id: RecordId) {
        self.repo.remove(id);
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != id);
        if self.entities.len() != before {
            self.revision += 1;
        }
    }

    /// Logout teardown: drop the mirror, keep the durable table. The
    /// store reports `is_loading` again until the next [`init`](Self::init).
    pub fn reset(&mut self) {
        self.entities.clear();
        self.is_loading = true;
        self.revision += 1;
    }
}

impl<E: Entity> std::fmt::Debug for CollectionStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore")
            .field("table", &E::TABLE)
            .field("len", &self.entities.len())
            .field("is_loading", &self.is_loading)
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panapp_store::{InMemoryKvStore, KeyValueStore, StoreError, StoreResult};
    use panapp_types::{ClientPatch, NewClient};

    fn draft(name: &str) -> NewClient {
        NewClient {
            name: name.into(),
            phone: "300 123 4567".into(),
            address: "Calle 12 #3-45".into(),
        }
    }

    #[test]
    fn starts_loading_and_init_clears_it() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        assert!(store.is_loading());
        store.init();
        assert!(!store.is_loading());
        assert!(store.entities().is_empty());
    }

    #[test]
    fn init_picks_up_previously_persisted_rows() {
        let adapter = StoreAdapter::in_memory();
        let mut first = ClientsStore::new(adapter.clone());
        first.init();
        let ana = first.add(draft("Ana"));

        // A second session over the same durable store sees the row.
        let mut second = ClientsStore::new(adapter);
        second.init();
        assert_eq!(second.entities(), &[ana]);
    }

    #[test]
    fn add_reflects_the_persisted_record() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        store.init();
        let ana = store.add(draft("Ana"));
        assert_eq!(store.find_by_id(ana.id), Some(&ana));
        assert_eq!(store.entities().len(), 1);
    }

    #[test]
    fn edit_mirrors_repository_timestamps() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        store.init();
        let ana = store.add(draft("Ana"));
        store.edit(
            ana.id,
            ClientPatch {
                phone: Some("301 000 0000".into()),
                ..Default::default()
            },
        );
        let edited = store.find_by_id(ana.id).unwrap();
        assert_eq!(edited.phone, "301 000 0000");
        assert!(edited.updated_at > ana.updated_at);
        assert_eq!(edited.created_at, ana.created_at);
    }

    #[test]
    fn edit_unknown_id_is_a_no_op() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        store.init();
        store.add(draft("Ana"));
        let before = store.revision();
        store.edit(RecordId::new(), ClientPatch::default());
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        store.init();
        let ana = store.add(draft("Ana"));
        store.remove(ana.id);
        store.remove(ana.id);
        assert!(store.entities().is_empty());
        assert!(store.find_by_id(ana.id).is_none());
    }

    #[test]
    fn revision_bumps_on_every_mutation() {
        let mut store = ClientsStore::new(StoreAdapter::in_memory());
        store.init();
        let r0 = store.revision();
        let ana = store.add(draft("Ana"));
        assert!(store.revision() > r0);
        let r1 = store.revision();
        store.remove(ana.id);
        assert!(store.revision() > r1);
    }

    #[test]
    fn reset_clears_memory_but_not_the_durable_table() {
        let adapter = StoreAdapter::in_memory();
        let mut store = ClientsStore::new(adapter.clone());
        store.init();
        store.add(draft("Ana"));
        store.reset();
        assert!(store.entities().is_empty());
        assert!(store.is_loading());

        store.init();
        assert_eq!(store.entities().len(), 1);
    }

    // ---- Fail-soft persistence ----

    /// Backend that accepts reads until a write has failed, mimicking a
    /// full or broken disk mid-session.
    struct WriteFailingStore {
        inner: InMemoryKvStore,
    }

    impl KeyValueStore for WriteFailingStore {
        fn read(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.read(key)
        }
        fn write(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Serialization("disk full".into()))
        }
        fn remove(&self, key: &str) -> StoreResult<bool> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn add_survives_a_failing_write() {
        let adapter = StoreAdapter::new(WriteFailingStore {
            inner: InMemoryKvStore::new(),
        });
        let mut store = ClientsStore::new(adapter);
        store.init();
        let ana = store.add(draft("Ana"));
        // Nothing was persisted, but the mirror carries the record for the
        // rest of the session and no error reached us.
        assert_eq!(store.find_by_id(ana.id), Some(&ana));
        assert_eq!(store.entities().len(), 1);
    }

    #[test]
    fn edit_survives_a_degraded_durable_table() {
        let adapter = StoreAdapter::new(WriteFailingStore {
            inner: InMemoryKvStore::new(),
        });
        let mut store = ClientsStore::new(adapter);
        store.init();
        let ana = store.add(draft("Ana"));
        // The durable table never saw the record, so the repository finds
        // nothing to update; the mirror still applies the patch.
        store.edit(
            ana.id,
            ClientPatch {
                name: Some("Ana Maria".into()),
                ..Default::default()
            },
        );
        let edited = store.find_by_id(ana.id).unwrap();
        assert_eq!(edited.name, "Ana Maria");
        assert!(edited.updated_at > ana.updated_at);
    }
}
