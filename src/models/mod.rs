//! Wire records exchanged with the order-management backend.

pub mod address;
pub mod auth;
pub mod database;
pub mod inventory;
pub mod order;
pub mod product;
pub mod shipping;

pub use address::{AddressInput, ShippingAddress};
pub use auth::{AuthStatus, LoginOutcome};
pub use database::DatabaseInfo;
pub use inventory::{InventoryItem, InventoryLevel};
pub use order::{NewOrder, NewOrderLine, OrderItemSummary, OrderRecord, OrderStatus, StatusUpdate};
pub use product::{BulkProductUpdate, Product, ProductDetails, ProductInput};
pub use shipping::ShippingMethod;

use serde::{Deserialize, Serialize};

/// Generic `{ "message": ... }` acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

/// Result of `POST /api/process-labels`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedLabels {
    #[serde(rename = "processedFiles", default)]
    pub processed_files: Vec<serde_json::Value>,
}
