//! Back-office operations over the order-management backend.

pub mod addresses;
pub mod database;
pub mod inventory;
pub mod orders;
pub mod products;

pub use addresses::AddressBook;
pub use database::DatabaseService;
pub use inventory::InventoryService;
pub use orders::OrderAdmin;
pub use products::ProductCatalog;
