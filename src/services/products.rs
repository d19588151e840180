use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::{BulkProductUpdate, Product, ProductDetails, ProductInput};

/// Product catalog administration.
#[derive(Clone)]
pub struct ProductCatalog {
    api: Arc<dyn OrderDeskApi>,
}

impl ProductCatalog {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.api.list_products().await
    }

    #[instrument(skip(self))]
    pub async fn details(&self) -> Result<Vec<ProductDetails>, ServiceError> {
        self.api.product_details().await
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create(&self, input: &ProductInput) -> Result<String, ServiceError> {
        input.validate()?;
        let dims = [input.length, input.width, input.height, input.weight];
        if dims.iter().flatten().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ServiceError::ValidationError(format!(
                "Invalid numeric values for {}. Length, width, height, and weight must be numbers.",
                input.sku
            )));
        }
        let ack = self.api.create_product(input).await?;
        info!("product created");
        Ok(ack.text_or("Product added successfully").to_string())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, sku: &str) -> Result<String, ServiceError> {
        let ack = self.api.delete_product(sku).await?;
        Ok(ack.text_or("Product deleted successfully").to_string())
    }

    /// Replaces catalog details in one request, confirmed by the admin password.
    #[instrument(skip(self, password, products), fields(count = products.len()))]
    pub async fn bulk_update(
        &self,
        password: &str,
        products: Vec<ProductDetails>,
    ) -> Result<String, ServiceError> {
        if password.is_empty() {
            return Err(ServiceError::ValidationError("Password is required".to_string()));
        }
        for product in &products {
            product.validate()?;
            product
                .check_dimensions()
                .map_err(ServiceError::ValidationError)?;
        }
        let request = BulkProductUpdate {
            password: password.to_string(),
            products,
        };
        let ack = self.api.bulk_update_products(&request).await?;
        info!("products updated");
        Ok(ack.text_or("Products updated successfully").to_string())
    }
}
