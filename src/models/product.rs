use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog entry from `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub product: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub flavor: String,
    #[serde(rename = "unitsCs", default)]
    pub units_per_case: String,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Catalog entry joined with its case shipping dimensions, as edited in bulk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductDetails {
    #[validate(length(min = 1))]
    pub sku: String,
    #[validate(length(min = 1))]
    pub product: String,
    pub size: String,
    pub flavor: String,
    #[serde(rename = "unitsCs")]
    pub units_per_case: String,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

/// Payload for `POST /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 20, message = "sku is required"))]
    pub sku: String,
    #[validate(length(min = 1, max = 100, message = "product is required"))]
    pub product: String,
    #[validate(length(min = 1, max = 20, message = "size is required"))]
    pub size: String,
    #[validate(length(min = 1, max = 50, message = "flavor is required"))]
    pub flavor: String,
    #[serde(rename = "unitsCs")]
    #[validate(length(min = 1, max = 20, message = "units per case is required"))]
    pub units_per_case: String,
    pub quantity: u32,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Body of `PUT /api/products/bulk-update`; the admin password confirms the edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkProductUpdate {
    pub password: String,
    pub products: Vec<ProductDetails>,
}

impl ProductDetails {
    /// Dimensions and weight must be finite, non-negative numbers.
    pub fn check_dimensions(&self) -> Result<(), String> {
        let valid = [self.length, self.width, self.height, self.weight]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if valid {
            Ok(())
        } else {
            Err(format!(
                "Invalid numeric values for {}. Length, width, height, and weight must be numbers.",
                self.sku
            ))
        }
    }
}
