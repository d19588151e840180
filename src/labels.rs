//! Shipping label attachments.
//!
//! Labels are either all PDFs or all images; a batch that would mix the two
//! is refused without touching the files already attached.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::errors::ServiceError;

const MIXED_WITH_EXISTING: &str = "All files must be the same type. You cannot mix PDF and image files. Please remove existing files first if you want to switch file types.";
const MIXED_IN_BATCH: &str =
    "All files must be the same type. Please upload either all PDFs or all images (PNG/JPG).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Pdf,
    Image,
}

impl LabelKind {
    /// Classifies a MIME type; anything that is neither PDF nor PNG/JPEG is unsupported.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let normalized = content_type.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "application/pdf" => Some(LabelKind::Pdf),
            "image/png" | "image/jpeg" | "image/jpg" => Some(LabelKind::Image),
            _ => None,
        }
    }

    /// Content type inferred from a file extension.
    pub fn content_type_for(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some("application/pdf"),
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            _ => None,
        }
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Pdf => write!(f, "pdf"),
            LabelKind::Image => write!(f, "image"),
        }
    }
}

/// One attached label file held in memory until the order is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct LabelFile {
    name: String,
    content_type: String,
    kind: LabelKind,
    bytes: Vec<u8>,
}

impl fmt::Debug for LabelFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl LabelFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, ServiceError> {
        let name = name.into();
        let content_type = content_type.into();
        let kind = LabelKind::from_content_type(&content_type)
            .ok_or_else(|| ServiceError::UnsupportedLabel(name.clone()))?;
        Ok(Self {
            name,
            content_type,
            kind,
            bytes,
        })
    }

    /// Reads a label from disk, typing it by extension.
    pub async fn from_path(path: &Path) -> Result<Self, ServiceError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = LabelKind::content_type_for(path)
            .ok_or_else(|| ServiceError::UnsupportedLabel(name.clone()))?;
        let bytes = tokio::fs::read(path).await?;
        Self::new(name, content_type, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Label count checked against the cases ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelMatch {
    pub labels: usize,
    pub cases: u64,
}

impl LabelMatch {
    pub fn is_match(&self) -> bool {
        u64::try_from(self.labels).map_or(false, |labels| labels == self.cases)
    }

    /// Status line shown next to the attachment list.
    pub fn status_line(&self) -> String {
        format!(
            "#{} Labels Uploaded | {} Cases Selected - {}",
            self.labels,
            self.cases,
            if self.is_match() { "MATCH" } else { "NOT MATCH" }
        )
    }

    pub fn ensure(&self) -> Result<(), ServiceError> {
        if self.is_match() {
            Ok(())
        } else {
            Err(ServiceError::LabelMismatch {
                labels: self.labels,
                cases: self.cases,
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    files: Vec<LabelFile>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The type every attached file shares, if any are attached.
    pub fn kind(&self) -> Option<LabelKind> {
        self.files.first().map(LabelFile::kind)
    }

    /// Appends a dropped batch. Returns the new file count.
    pub fn add_batch(&mut self, batch: Vec<LabelFile>) -> Result<usize, ServiceError> {
        if let Some(existing) = self.kind() {
            if batch.iter().any(|file| file.kind() != existing) {
                return Err(ServiceError::MixedLabelTypes(MIXED_WITH_EXISTING.to_string()));
            }
        } else if let Some(first) = batch.first().map(LabelFile::kind) {
            if batch.iter().any(|file| file.kind() != first) {
                return Err(ServiceError::MixedLabelTypes(MIXED_IN_BATCH.to_string()));
            }
        }

        debug!(added = batch.len(), "attaching shipping labels");
        self.files.extend(batch);
        Ok(self.files.len())
    }

    /// Removes the first attached file with `name`.
    pub fn remove(&mut self, name: &str) -> Option<LabelFile> {
        let index = self.files.iter().position(|file| file.name() == name)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[LabelFile] {
        &self.files
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(LabelFile::name)
    }

    pub fn reconcile(&self, total_cases: u64) -> LabelMatch {
        LabelMatch {
            labels: self.files.len(),
            cases: total_cases,
        }
    }
}
