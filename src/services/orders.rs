//! Order history administration.
//!
//! Shipped orders are locked; only processing orders can be voided or have
//! their status changed, and only processing or voided orders can be deleted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::{OrderRecord, OrderStatus, StatusUpdate};

#[derive(Clone)]
pub struct OrderAdmin {
    api: Arc<dyn OrderDeskApi>,
}

impl OrderAdmin {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api }
    }

    /// Newest first; undated orders sort last.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OrderRecord>, ServiceError> {
        let mut orders = self.api.list_orders().await?;
        orders.sort_by(|a, b| {
            b.created_at_utc()
                .cmp(&a.created_at_utc())
                .then(b.order_id.cmp(&a.order_id))
        });
        Ok(orders)
    }

    pub async fn find(&self, order_id: i64) -> Result<OrderRecord, ServiceError> {
        self.api
            .list_orders()
            .await?
            .into_iter()
            .find(|order| order.order_id == order_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    /// Saves the order's label attachment into `dir` and returns its path.
    #[instrument(skip(self, dir))]
    pub async fn download_attachment(&self, order_id: i64, dir: &Path) -> Result<PathBuf, ServiceError> {
        let order = self.find(order_id).await?;
        if !order.has_attachment {
            return Err(ServiceError::NotFound(format!(
                "Order {} has no shipping label attachment",
                order_id
            )));
        }
        let bytes = self.api.download_attachment(order_id).await?;
        let path = dir.join(order.attachment_file_name());
        tokio::fs::write(&path, &bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "attachment saved");
        Ok(path)
    }

    #[instrument(skip(self))]
    pub async fn void(&self, order_id: i64) -> Result<String, ServiceError> {
        let order = self.find(order_id).await?;
        if !order.status().is_open() {
            return Err(ServiceError::InvalidOperation(format!(
                "Only processing orders can be voided (order {} is {})",
                order_id,
                order.status()
            )));
        }
        let ack = self.api.void_order(order_id).await?;
        info!("order voided");
        Ok(ack.text_or("Order voided successfully").to_string())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, order_id: i64) -> Result<String, ServiceError> {
        let order = self.find(order_id).await?;
        if !order.status().is_deletable() {
            return Err(ServiceError::InvalidOperation(format!(
                "Cannot delete {} order {}",
                order.status(),
                order_id
            )));
        }
        let ack = self.api.delete_order(order_id).await?;
        info!("order deleted");
        Ok(ack.text_or("Order deleted successfully").to_string())
    }

    /// Marks a processing order shipped or cancelled.
    #[instrument(skip(self, password))]
    pub async fn update_status(
        &self,
        order_id: i64,
        status: OrderStatus,
        password: &str,
    ) -> Result<String, ServiceError> {
        if !matches!(status, OrderStatus::Shipped | OrderStatus::Cancelled) {
            return Err(ServiceError::ValidationError(format!(
                "Status must be Shipped or Cancelled, not {}",
                status
            )));
        }
        if password.is_empty() {
            return Err(ServiceError::ValidationError("Password is required".to_string()));
        }
        let order = self.find(order_id).await?;
        if !order.status().is_open() {
            error!(current = %order.status(), "status change refused");
            return Err(ServiceError::InvalidOperation(format!(
                "Cannot change status from {} to {}",
                order.status(),
                status
            )));
        }
        let update = StatusUpdate {
            status,
            password: password.to_string(),
        };
        let ack = self.api.update_order_status(order_id, &update).await?;
        info!(%status, "order status updated");
        Ok(ack.text_or("Order status updated").to_string())
    }
}
