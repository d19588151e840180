use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::review::{OrderReceipt, OrderReview, OrderSummary};
use super::{form, labels, Step};
use crate::api::OrderDeskApi;
use crate::draft::OrderDraft;
use crate::errors::ServiceError;
use crate::labels::{LabelFile, LabelMatch};
use crate::models::{InventoryItem, ShippingAddress, ShippingMethod};

/// Owns the draft and walks it through form, labels and validation.
pub struct Checkout {
    api: Arc<dyn OrderDeskApi>,
    inventory: Vec<InventoryItem>,
    addresses: Vec<ShippingAddress>,
    draft: OrderDraft,
    step: Step,
    review: Option<OrderReview>,
}

impl Checkout {
    /// Fetches inventory and the address book and opens an empty draft.
    #[instrument(skip(api))]
    pub async fn load(api: Arc<dyn OrderDeskApi>) -> Result<Self, ServiceError> {
        let (inventory, addresses) = tokio::try_join!(api.list_inventory(), api.list_addresses())?;
        info!(products = inventory.len(), addresses = addresses.len(), "checkout loaded");
        Ok(Self {
            draft: OrderDraft::from_inventory(&inventory),
            api,
            inventory,
            addresses: form::sorted_by_nickname(&addresses),
            step: Step::OrderForm,
            review: None,
        })
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn addresses(&self) -> &[ShippingAddress] {
        &self.addresses
    }

    pub fn order_review(&self) -> Option<&OrderReview> {
        self.review.as_ref()
    }

    fn require(&self, step: Step) -> Result<(), ServiceError> {
        if self.step == step {
            Ok(())
        } else {
            Err(ServiceError::InvalidOperation(format!(
                "Not available on the {} step (expected {})",
                self.step, step
            )))
        }
    }

    pub fn set_po(&mut self, po: impl Into<String>) -> Result<(), ServiceError> {
        self.require(Step::OrderForm)?;
        self.draft.set_po(po);
        Ok(())
    }

    pub fn select_address(&mut self, id: Option<i64>) -> Result<(), ServiceError> {
        self.require(Step::OrderForm)?;
        let address = id
            .map(|id| form::find_address(&self.addresses, id))
            .transpose()?;
        self.draft.select_address(address);
        Ok(())
    }

    pub fn set_cases(&mut self, sku: &str, cases: i64) -> Result<u32, ServiceError> {
        self.require(Step::OrderForm)?;
        self.draft.set_cases(sku, cases)
    }

    pub fn set_cases_input(&mut self, sku: &str, raw: &str) -> Result<u32, ServiceError> {
        self.require(Step::OrderForm)?;
        self.draft.set_cases_input(sku, raw)
    }

    /// Order form to shipping labels.
    pub fn next(&mut self) -> Result<Step, ServiceError> {
        self.require(Step::OrderForm)?;
        form::validate(&self.draft)?;
        self.step = Step::ShippingLabels;
        Ok(self.step)
    }

    pub fn attach(&mut self, batch: Vec<LabelFile>) -> Result<LabelMatch, ServiceError> {
        self.require(Step::ShippingLabels)?;
        labels::attach(&mut self.draft, batch)
    }

    pub fn detach(&mut self, name: &str) -> Result<LabelMatch, ServiceError> {
        self.require(Step::ShippingLabels)?;
        labels::detach(&mut self.draft, name)
    }

    pub fn label_status(&self) -> LabelMatch {
        labels::status(&self.draft)
    }

    pub fn set_shipping_method(&mut self, method: ShippingMethod) -> Result<(), ServiceError> {
        self.require(Step::ShippingLabels)?;
        self.draft.set_shipping_method(method);
        Ok(())
    }

    /// Shipping labels to validation; snapshots existing PO numbers.
    pub async fn review(&mut self) -> Result<OrderSummary, ServiceError> {
        self.require(Step::ShippingLabels)?;
        labels::ensure_ready(&self.draft)?;
        let review = OrderReview::load(self.api.as_ref()).await;
        let summary = review.summary(&self.draft);
        self.review = Some(review);
        self.step = Step::Validation;
        Ok(summary)
    }

    pub fn summary(&self) -> Option<OrderSummary> {
        self.review.as_ref().map(|review| review.summary(&self.draft))
    }

    /// Submits the order; on success refreshes inventory and starts a fresh draft.
    pub async fn confirm(&mut self) -> Result<OrderReceipt, ServiceError> {
        self.require(Step::Validation)?;
        let review = self
            .review
            .as_mut()
            .ok_or_else(|| ServiceError::InvalidOperation("Order has not been reviewed".to_string()))?;
        let receipt = review.confirm(self.api.as_ref(), &self.draft).await?;

        match self.api.list_inventory().await {
            Ok(inventory) => self.inventory = inventory,
            Err(err) => warn!(error = %err, "inventory refresh after submission failed"),
        }
        self.start_over();
        Ok(receipt)
    }

    /// Returns to the order form from any step, keeping the draft and its labels.
    pub fn back(&mut self) -> Step {
        self.review = None;
        self.step = Step::OrderForm;
        self.step
    }

    /// Discards the draft and starts again from current inventory.
    pub async fn reset(&mut self) -> Result<(), ServiceError> {
        self.inventory = self.api.list_inventory().await?;
        self.start_over();
        Ok(())
    }

    pub async fn refresh_addresses(&mut self) -> Result<(), ServiceError> {
        let addresses = self.api.list_addresses().await?;
        self.addresses = form::sorted_by_nickname(&addresses);
        let selected = self.draft.address().map(|address| address.id);
        if let Some(id) = selected {
            let current = form::find_address(&self.addresses, id).ok();
            self.draft.select_address(current);
        }
        Ok(())
    }

    /// Deletes an address from the book, clearing it from the draft if selected.
    pub async fn delete_address(&mut self, id: i64) -> Result<(), ServiceError> {
        self.api.delete_address(id).await?;
        self.addresses.retain(|address| address.id != id);
        if self.draft.address().map(|address| address.id) == Some(id) {
            self.draft.select_address(None);
        }
        Ok(())
    }

    fn start_over(&mut self) {
        self.draft = OrderDraft::from_inventory(&self.inventory);
        self.review = None;
        self.step = Step::OrderForm;
    }
}
