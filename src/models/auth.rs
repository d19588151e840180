use serde::{Deserialize, Serialize};

/// What came back from a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    Authenticated,
    Rejected { message: String },
    LockedOut { message: String, remaining_seconds: u64 },
}

/// Raw body of `POST /api/login`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub lockout: bool,
    #[serde(default)]
    pub remaining_seconds: Option<u64>,
}

/// Body of `GET /api/check-auth`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
}
