//! Order validation step.
//!
//! Entering the step takes a snapshot of every purchase-order number the
//! backend knows about. Confirmation is checked against that snapshot and
//! the label count before anything is uploaded; the backend still has the
//! final word on concurrent duplicates.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{error, info, instrument, warn};

use super::{form, labels};
use crate::api::OrderDeskApi;
use crate::draft::OrderDraft;
use crate::errors::ServiceError;
use crate::models::ShippingMethod;

const LOAD_FAILED: &str = "Failed to validate PO number";
const NO_LABELS: &str = "Please attach shipping label(s) before submitting the order.";
const DEFAULT_CREATED: &str = "Order created successfully";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ReviewState {
    Loading,
    Ready,
    Submitting,
    Success,
    Error(String),
}

/// What the user is asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub purchase_order_number: String,
    pub address: Vec<String>,
    pub items: Vec<String>,
    pub attachments: Vec<String>,
    pub shipping_method: ShippingMethod,
    pub total_cases: u64,
    pub duplicate_warning: Option<String>,
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PO#: {}", self.purchase_order_number)?;
        if let Some(warning) = &self.duplicate_warning {
            writeln!(f, "WARNING: {}", warning)?;
        }
        writeln!(f, "Ship to:")?;
        for line in &self.address {
            writeln!(f, "  {}", line)?;
        }
        writeln!(f, "Items ({} cases):", self.total_cases)?;
        for item in &self.items {
            writeln!(f, "  {}", item)?;
        }
        writeln!(f, "Shipping labels:")?;
        for name in &self.attachments {
            writeln!(f, "  {}", name)?;
        }
        write!(f, "Shipping method: {}", self.shipping_method)
    }
}

/// Acknowledgement of a created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderReceipt {
    pub purchase_order_number: String,
    pub total_cases: u64,
    pub labels: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct OrderReview {
    state: ReviewState,
    existing_pos: Option<HashSet<String>>,
}

impl Default for OrderReview {
    fn default() -> Self {
        Self {
            state: ReviewState::Loading,
            existing_pos: None,
        }
    }
}

fn normalize_po(po: &str) -> String {
    po.trim().to_lowercase()
}

impl OrderReview {
    /// Fetches the order history and snapshots its purchase-order numbers.
    ///
    /// A failed fetch does not error: the review lands in `Error` and refuses
    /// to confirm, since duplicates could not be ruled out.
    #[instrument(skip(api))]
    pub async fn load(api: &dyn OrderDeskApi) -> Self {
        match api.list_orders().await {
            Ok(orders) => {
                let existing: HashSet<String> = orders
                    .iter()
                    .map(|order| normalize_po(&order.purchase_order_number))
                    .collect();
                info!(known = existing.len(), "purchase order snapshot loaded");
                Self {
                    state: ReviewState::Ready,
                    existing_pos: Some(existing),
                }
            }
            Err(err) => {
                error!(error = %err, "could not load existing orders");
                Self {
                    state: ReviewState::Error(LOAD_FAILED.to_string()),
                    existing_pos: None,
                }
            }
        }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.existing_pos.is_some()
    }

    pub fn is_duplicate(&self, po: &str) -> bool {
        self.existing_pos
            .as_ref()
            .map_or(false, |known| known.contains(&normalize_po(po)))
    }

    pub fn summary(&self, draft: &OrderDraft) -> OrderSummary {
        let po = draft.po().trim().to_string();
        let duplicate_warning = self
            .is_duplicate(&po)
            .then(|| ServiceError::DuplicatePurchaseOrder(po.clone()).to_string());
        OrderSummary {
            address: draft.address().map(|a| a.block()).unwrap_or_default(),
            items: draft.ordered_lines().map(|line| line.describe()).collect(),
            attachments: draft.labels().names().map(str::to_string).collect(),
            shipping_method: draft.shipping_method(),
            total_cases: draft.total_cases(),
            purchase_order_number: po,
            duplicate_warning,
        }
    }

    fn precheck(&self, draft: &OrderDraft) -> Result<(), ServiceError> {
        form::validate(draft)?;
        let po = draft.po().trim();
        if self.is_duplicate(po) {
            return Err(ServiceError::DuplicatePurchaseOrder(po.to_string()));
        }
        if draft.labels().is_empty() {
            return Err(ServiceError::ValidationError(NO_LABELS.to_string()));
        }
        labels::ensure_ready(draft)
    }

    /// Uploads the labels and creates the order.
    ///
    /// Every local check runs before the first request. On failure the
    /// review moves to `Error` and may be confirmed again.
    #[instrument(skip(self, api, draft), fields(po = %draft.po().trim()))]
    pub async fn confirm(
        &mut self,
        api: &dyn OrderDeskApi,
        draft: &OrderDraft,
    ) -> Result<OrderReceipt, ServiceError> {
        match &self.state {
            ReviewState::Submitting => {
                return Err(ServiceError::InvalidOperation(
                    "Order submission already in progress".to_string(),
                ))
            }
            ReviewState::Success => {
                return Err(ServiceError::InvalidOperation(
                    "Order has already been submitted".to_string(),
                ))
            }
            ReviewState::Loading => {
                return Err(ServiceError::InvalidOperation(
                    "Existing orders are still loading".to_string(),
                ))
            }
            ReviewState::Ready | ReviewState::Error(_) => {}
        }
        if !self.is_loaded() {
            return Err(ServiceError::InvalidOperation(LOAD_FAILED.to_string()));
        }

        if let Err(err) = self.precheck(draft) {
            warn!(error = %err, "order refused before submission");
            self.state = ReviewState::Error(err.user_message());
            return Err(err);
        }

        self.state = ReviewState::Submitting;
        match Self::submit(api, draft).await {
            Ok(receipt) => {
                info!(cases = receipt.total_cases, labels = receipt.labels, "order created");
                self.state = ReviewState::Success;
                Ok(receipt)
            }
            Err(err) => {
                error!(error = %err, "order submission failed");
                self.state = ReviewState::Error(err.user_message());
                Err(err)
            }
        }
    }

    async fn submit(api: &dyn OrderDeskApi, draft: &OrderDraft) -> Result<OrderReceipt, ServiceError> {
        let order = draft.to_new_order()?;
        let files = draft.labels().files();

        let processed = api.process_labels(files).await?;
        info!(processed = processed.processed_files.len(), "labels processed");

        let ack = api.create_order(&order, files).await?;
        Ok(OrderReceipt {
            message: ack.text_or(DEFAULT_CREATED).to_string(),
            purchase_order_number: order.purchase_order_number,
            total_cases: draft.total_cases(),
            labels: files.len(),
        })
    }
}
