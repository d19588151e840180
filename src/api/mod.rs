//! Transport seam between the workflow and the order-management backend.

mod client;
mod session;

pub use client::ApiClient;
pub use session::{SessionStore, StoredSession};

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::labels::LabelFile;
use crate::models::{
    AddressInput, ApiMessage, BulkProductUpdate, DatabaseInfo, InventoryItem, InventoryLevel,
    LoginOutcome, NewOrder, OrderRecord, ProcessedLabels, Product, ProductDetails, ProductInput,
    ShippingAddress, StatusUpdate,
};

/// Every backend call the application makes.
#[async_trait]
pub trait OrderDeskApi: Send + Sync {
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ServiceError>;
    async fn update_inventory(&self, sku: &str, quantity: u32) -> Result<InventoryLevel, ServiceError>;

    async fn list_addresses(&self) -> Result<Vec<ShippingAddress>, ServiceError>;
    async fn get_address(&self, id: i64) -> Result<ShippingAddress, ServiceError>;
    async fn create_address(&self, input: &AddressInput) -> Result<ShippingAddress, ServiceError>;
    async fn update_address(
        &self,
        id: i64,
        input: &AddressInput,
    ) -> Result<ShippingAddress, ServiceError>;
    async fn delete_address(&self, id: i64) -> Result<(), ServiceError>;

    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn product_details(&self) -> Result<Vec<ProductDetails>, ServiceError>;
    async fn create_product(&self, input: &ProductInput) -> Result<ApiMessage, ServiceError>;
    async fn delete_product(&self, sku: &str) -> Result<ApiMessage, ServiceError>;
    async fn bulk_update_products(
        &self,
        request: &BulkProductUpdate,
    ) -> Result<ApiMessage, ServiceError>;

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ServiceError>;
    async fn process_labels(&self, labels: &[LabelFile]) -> Result<ProcessedLabels, ServiceError>;
    async fn create_order(
        &self,
        order: &NewOrder,
        labels: &[LabelFile],
    ) -> Result<ApiMessage, ServiceError>;
    async fn download_attachment(&self, order_id: i64) -> Result<Vec<u8>, ServiceError>;
    async fn void_order(&self, order_id: i64) -> Result<ApiMessage, ServiceError>;
    async fn delete_order(&self, order_id: i64) -> Result<ApiMessage, ServiceError>;
    async fn update_order_status(
        &self,
        order_id: i64,
        update: &StatusUpdate,
    ) -> Result<ApiMessage, ServiceError>;

    async fn login(&self, password: &str) -> Result<LoginOutcome, ServiceError>;
    async fn logout(&self) -> Result<(), ServiceError>;
    async fn check_auth(&self) -> Result<bool, ServiceError>;

    async fn database_info(&self) -> Result<DatabaseInfo, ServiceError>;
    async fn backup_database(&self) -> Result<ApiMessage, ServiceError>;
}
