use serde::{Deserialize, Serialize};
use validator::Validate;

/// Saved ship-to address from the address book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub id: i64,
    pub nickname: String,
    pub company_name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl ShippingAddress {
    /// Multi-line block as printed on the review screen.
    pub fn block(&self) -> Vec<String> {
        let mut lines = vec![self.company_name.clone(), self.address_line1.clone()];
        if let Some(line2) = self.address_line2.as_ref().filter(|l| !l.trim().is_empty()) {
            lines.push(line2.clone());
        }
        lines.push(format!("{}, {} {}", self.city, self.state, self.zip_code));
        lines
    }
}

/// Payload for creating or updating an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[validate(length(min = 1, max = 100, message = "nickname is required"))]
    pub nickname: String,
    #[validate(length(min = 1, max = 100, message = "company name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, max = 200, message = "address line 1 is required"))]
    pub address_line1: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub address_line2: Option<String>,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(length(equal = 2, message = "state must be a two-letter code"))]
    pub state: String,
    #[validate(length(min = 1, max = 10, message = "zip code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, max = 20, message = "phone is required"))]
    pub phone: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
}

impl From<&ShippingAddress> for AddressInput {
    fn from(address: &ShippingAddress) -> Self {
        Self {
            nickname: address.nickname.clone(),
            company_name: address.company_name.clone(),
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            phone: address.phone.clone(),
            email: address.email.clone(),
        }
    }
}
