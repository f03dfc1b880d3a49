use panapp_store::StoreAdapter;

use crate::auth::AuthState;
use crate::collection::{ClientsStore, CollectionStore, OrdersStore, ProductsStore};

/// The application-state handle a collaborator holds.
///
/// Aggregates the four reactive stores over one shared durable-store
/// adapter. Constructed at process start, [`init`](Self::init)ed once,
/// torn down at [`logout`](Self::logout): in-memory state clears, the
/// durable store is retained for the next session. There is no ambient
/// global; whoever needs the state gets this handle passed in.
pub struct AppState {
    pub auth: AuthState,
    pub clients: ClientsStore,
    pub products: ProductsStore,
    pub orders: OrdersStore,
}

impl AppState {
    /// Wire the four stores over one adapter. Nothing is loaded yet;
    /// call [`init`](Self::init).
    pub fn new(store: StoreAdapter) -> Self {
        Self {
            auth: AuthState::new(store.clone()),
            clients: CollectionStore::new(store.clone()),
            products: CollectionStore::new(store.clone()),
            orders: CollectionStore::new(store),
        }
    }

    /// Activate every store: session bootstrap plus the three table
    /// loads.
    pub fn init(&mut self) {
        self.auth.init();
        self.clients.init();
        self.products.init();
        self.orders.init();
    }

    /// End the session: clear the persisted session record and every
    /// in-memory collection. Durable tables stay for the next login.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.clients.reset();
        self.products.reset();
        self.orders.reset();
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("clients", &self.clients)
            .field("products", &self.products)
            .field("orders", &self.orders)
            .finish()
    }
}
