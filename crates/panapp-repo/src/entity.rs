use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use panapp_types::{
    Client, ClientPatch, NewClient, NewOrder, NewProduct, Order, OrderPatch, Product,
    ProductPatch, RecordId,
};

/// A persisted record with identity and lifecycle timestamps.
///
/// Implementations wire one record type to its durable table and define
/// how caller input becomes a record (`build`) and how partial updates
/// merge into one (`apply`). Identifiers and timestamps stay under
/// repository control: `build` and `touch` receive them, callers never
/// supply them.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Durable-store key of this entity's table.
    const TABLE: &'static str;

    /// Caller-supplied fields for creation.
    type Draft;

    /// Partial update; unset fields are left untouched.
    type Patch: Clone;

    fn id(&self) -> RecordId;

    /// Assemble a record from a draft, with both timestamps set to `at`.
    fn build(draft: Self::Draft, id: RecordId, at: DateTime<Utc>) -> Self;

    /// Merge a patch into this record. Timestamps are not part of a patch;
    /// the caller follows up with [`Entity::touch`].
    fn apply(&mut self, patch: Self::Patch);

    /// Refresh `updated_at` to the operation time.
    fn touch(&mut self, at: DateTime<Utc>);
}

impl Entity for Client {
    const TABLE: &'static str = "clients.table";
    type Draft = NewClient;
    type Patch = ClientPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn build(draft: NewClient, id: RecordId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            address: draft.address,
            created_at: at,
            updated_at: at,
        }
    }

    fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products.table";
    type Draft = NewProduct;
    type Patch = ProductPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn build(draft: NewProduct, id: RecordId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            price_cop: draft.price_cop,
            image: draft.image,
            created_at: at,
            updated_at: at,
        }
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price_cop) = patch.price_cop {
            self.price_cop = price_cop;
        }
        // Two-level option: outer None leaves the image alone, inner None
        // clears it.
        if let Some(image) = patch.image {
            self.image = image;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Entity for Order {
    const TABLE: &'static str = "orders.table";
    type Draft = NewOrder;
    type Patch = OrderPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    fn build(draft: NewOrder, id: RecordId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_name: draft.customer_name,
            details: draft.details,
            quantity: draft.quantity,
            delivery_date: draft.delivery_date,
            delivery_time: draft.delivery_time,
            status: draft.status,
            created_at: at,
            updated_at: at,
        }
    }

    fn apply(&mut self, patch: OrderPatch) {
        if let Some(customer_name) = patch.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(delivery_date) = patch.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(delivery_time) = patch.delivery_time {
            self.delivery_time = delivery_time;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
