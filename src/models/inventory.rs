use serde::{Deserialize, Serialize};

/// One row of `GET /api/inventory`: catalog details joined with the on-hand case count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub sku: String,
    pub product: String,
    pub size: String,
    pub flavor: String,
    #[serde(rename = "unitsCs")]
    pub units_per_case: String,
    pub quantity: i64,
}

impl InventoryItem {
    /// Cases available for ordering; negative stock counts as none.
    pub fn available_cases(&self) -> u32 {
        u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX)
    }

    pub fn label(&self) -> String {
        format!("{} - {} ({})", self.product, self.flavor, self.size)
    }
}

/// Response of `PUT /api/inventory/:sku`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub sku: String,
    pub quantity: i64,
}
