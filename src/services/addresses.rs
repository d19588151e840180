use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::{AddressInput, ShippingAddress};
use crate::workflow::form;

/// Saved ship-to addresses.
#[derive(Clone)]
pub struct AddressBook {
    api: Arc<dyn OrderDeskApi>,
}

fn normalized(input: &AddressInput) -> AddressInput {
    AddressInput {
        state: input.state.trim().to_uppercase(),
        address_line2: input
            .address_line2
            .as_deref()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string),
        ..input.clone()
    }
}

impl AddressBook {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api }
    }

    /// All addresses, sorted by nickname.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ShippingAddress>, ServiceError> {
        let addresses = self.api.list_addresses().await?;
        Ok(form::sorted_by_nickname(&addresses))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<ShippingAddress, ServiceError> {
        self.api.get_address(id).await
    }

    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    pub async fn create(&self, input: &AddressInput) -> Result<ShippingAddress, ServiceError> {
        let input = normalized(input);
        input.validate()?;
        let created = self.api.create_address(&input).await?;
        info!(id = created.id, "address created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: &AddressInput) -> Result<ShippingAddress, ServiceError> {
        let input = normalized(input);
        input.validate()?;
        self.api.update_address(id, &input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.api.delete_address(id).await?;
        info!(id, "address deleted");
        Ok(())
    }
}
