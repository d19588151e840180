//! The checkout workflow: order form, shipping labels, then validation.

pub mod checkout;
pub mod form;
pub mod labels;
pub mod review;

pub use checkout::Checkout;
pub use review::{OrderReceipt, OrderReview, OrderSummary, ReviewState};

use serde::Serialize;
use strum::Display;

/// Screen of the checkout currently in front of the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
pub enum Step {
    #[default]
    #[strum(to_string = "Order Form")]
    OrderForm,
    #[strum(to_string = "Shipping Labels")]
    ShippingLabels,
    #[strum(to_string = "Order Validation")]
    Validation,
}
