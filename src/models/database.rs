use serde::{Deserialize, Serialize};

/// Snapshot of the backend database returned by `GET /api/database-info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size_readable: Option<String>,
    #[serde(default)]
    pub estimated_zip_mb: Option<f64>,
    #[serde(default)]
    pub estimated_zip_readable: Option<String>,
    #[serde(default)]
    pub can_email: bool,
    #[serde(default)]
    pub warning: Option<String>,
}
