use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// A catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    /// Price in Colombian pesos. COP has no minor unit in practice, so a
    /// plain non-negative integer is the whole representation.
    #[serde(rename = "priceCOP")]
    pub price_cop: u64,
    /// Data URI or URL of the product picture.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a [`Product`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price_cop: u64,
    pub image: Option<String>,
}

/// Partial update of a [`Product`]. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price_cop: Option<u64>,
    pub image: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_field_keeps_its_stored_name() {
        let product = Product {
            id: RecordId::new(),
            name: "Pan de bono".into(),
            price_cop: 2500,
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json.get("priceCOP").and_then(|v| v.as_u64()), Some(2500));
    }
}
