use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::{InventoryItem, InventoryLevel};

/// Case counts per SKU.
#[derive(Clone)]
pub struct InventoryService {
    api: Arc<dyn OrderDeskApi>,
}

impl InventoryService {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        self.api.list_inventory().await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(&self, sku: &str, quantity: u32) -> Result<InventoryLevel, ServiceError> {
        if sku.trim().is_empty() {
            return Err(ServiceError::ValidationError("SKU is required".to_string()));
        }
        let level = self.api.update_inventory(sku, quantity).await?;
        info!(sku, quantity = level.quantity, "inventory updated");
        Ok(level)
    }

    /// Sends every pending change, then reports the first failure if any.
    #[instrument(skip(self, changes), fields(count = changes.len()))]
    pub async fn apply_changes(
        &self,
        changes: &BTreeMap<String, u32>,
    ) -> Result<Vec<InventoryLevel>, ServiceError> {
        let mut applied = Vec::with_capacity(changes.len());
        let mut first_error = None;
        for (sku, quantity) in changes {
            match self.set_quantity(sku, *quantity).await {
                Ok(level) => applied.push(level),
                Err(err) => {
                    warn!(sku = %sku, error = %err, "inventory change failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(applied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockApi;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn every_change_is_sent_even_after_a_failure() {
        let mut api = MockApi::new();
        api.expect_update_inventory()
            .times(3)
            .returning(|sku, quantity| {
                if sku == "B-cs" {
                    Err(ServiceError::NotFound("Product not found".to_string()))
                } else {
                    Ok(InventoryLevel {
                        sku: sku.to_string(),
                        quantity: i64::from(quantity),
                    })
                }
            });
        let service = InventoryService::new(Arc::new(api));

        let changes = BTreeMap::from([
            ("A-cs".to_string(), 4),
            ("B-cs".to_string(), 1),
            ("C-cs".to_string(), 9),
        ]);
        assert_matches!(service.apply_changes(&changes).await, Err(ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_sku_is_rejected() {
        let mut api = MockApi::new();
        api.expect_update_inventory().never();
        let service = InventoryService::new(Arc::new(api));
        assert_matches!(service.set_quantity(" ", 3).await, Err(ServiceError::ValidationError(_)));
    }
}
