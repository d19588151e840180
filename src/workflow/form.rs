//! Order form checks.

use crate::draft::OrderDraft;
use crate::errors::ServiceError;
use crate::models::ShippingAddress;

pub const MISSING_FIELDS: &str =
    "Please fill in all required fields (PO#, Address, and at least one product)";

/// Gate between the order form and the label step.
pub fn validate(draft: &OrderDraft) -> Result<(), ServiceError> {
    if draft.po().trim().is_empty() || draft.address().is_none() || !draft.has_items() {
        return Err(ServiceError::ValidationError(MISSING_FIELDS.to_string()));
    }
    Ok(())
}

pub fn find_address(
    addresses: &[ShippingAddress],
    id: i64,
) -> Result<ShippingAddress, ServiceError> {
    addresses
        .iter()
        .find(|address| address.id == id)
        .cloned()
        .ok_or_else(|| ServiceError::NotFound(format!("Shipping address {} not found", id)))
}

/// Address book order for pick lists.
pub fn sorted_by_nickname(addresses: &[ShippingAddress]) -> Vec<ShippingAddress> {
    let mut sorted = addresses.to_vec();
    sorted.sort_by_key(|address| address.nickname.to_lowercase());
    sorted
}
