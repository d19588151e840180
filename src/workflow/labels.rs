//! Shipping label step: attachments reconciled against the cases ordered.

use tracing::info;

use crate::draft::OrderDraft;
use crate::errors::ServiceError;
use crate::labels::{LabelFile, LabelMatch};

pub fn status(draft: &OrderDraft) -> LabelMatch {
    draft.labels().reconcile(draft.total_cases())
}

/// Adds a dropped batch; a rejected batch leaves the attachments untouched.
pub fn attach(draft: &mut OrderDraft, batch: Vec<LabelFile>) -> Result<LabelMatch, ServiceError> {
    let count = draft.labels_mut().add_batch(batch)?;
    info!(labels = count, cases = draft.total_cases(), "labels attached");
    Ok(status(draft))
}

pub fn detach(draft: &mut OrderDraft, name: &str) -> Result<LabelMatch, ServiceError> {
    draft
        .labels_mut()
        .remove(name)
        .ok_or_else(|| ServiceError::NotFound(format!("No attached label named '{}'", name)))?;
    Ok(status(draft))
}

/// Continuation is blocked until one label is attached per case.
pub fn ensure_ready(draft: &OrderDraft) -> Result<(), ServiceError> {
    status(draft).ensure()
}
