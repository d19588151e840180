//! Order Desk Library
//!
//! Client side of the order-management backend: the storefront checkout
//! workflow (order form, shipping labels, validation) plus address, product,
//! inventory, order and database administration.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod api;
pub mod auth;
pub mod config;
pub mod draft;
pub mod errors;
pub mod labels;
pub mod models;
pub mod services;
pub mod workflow;

pub use api::{ApiClient, OrderDeskApi, SessionStore, StoredSession};
pub use config::AppConfig;
pub use errors::ServiceError;

/// Commonly used types.
pub mod prelude {
    pub use crate::api::{ApiClient, OrderDeskApi};
    pub use crate::auth::LoginGate;
    pub use crate::config::{init_tracing, load_config, AppConfig};
    pub use crate::draft::OrderDraft;
    pub use crate::errors::ServiceError;
    pub use crate::labels::{LabelFile, LabelSet};
    pub use crate::models::*;
    pub use crate::services::{AddressBook, DatabaseService, InventoryService, OrderAdmin, ProductCatalog};
    pub use crate::workflow::{Checkout, Step};
}
