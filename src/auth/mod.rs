/*!
 * # Shared-password login gate
 *
 * The backend guards the application with one shared password and locks
 * the login out after repeated failures. The gate mirrors that lockout
 * locally: while the countdown runs, attempts are refused without
 * contacting the backend.
 */

mod lockout;

pub use lockout::{format_countdown, Lockout};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::LoginOutcome;

pub struct LoginGate {
    api: Arc<dyn OrderDeskApi>,
    lockout: Option<Lockout>,
}

impl LoginGate {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api, lockout: None }
    }

    /// Resumes a lockout remembered from an earlier session.
    pub fn with_lockout(api: Arc<dyn OrderDeskApi>, locked_until: Option<DateTime<Utc>>) -> Self {
        Self {
            api,
            lockout: locked_until.map(Lockout::until),
        }
    }

    pub fn lockout(&self) -> Option<Lockout> {
        self.lockout
    }

    /// Seconds left on the lockout at `now`, if one is still running.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<u64> {
        self.lockout
            .map(|lockout| lockout.remaining_at(now))
            .filter(|remaining| *remaining > 0)
    }

    pub async fn attempt(&mut self, password: &str) -> Result<LoginOutcome, ServiceError> {
        self.attempt_at(password, Utc::now()).await
    }

    pub async fn attempt_at(
        &mut self,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginOutcome, ServiceError> {
        if let Some(remaining_seconds) = self.remaining_at(now) {
            return Err(ServiceError::LockedOut {
                message: format!(
                    "Too many failed login attempts. Time remaining: {}",
                    format_countdown(remaining_seconds)
                ),
                remaining_seconds,
            });
        }
        self.lockout = None;

        if password.is_empty() {
            return Err(ServiceError::ValidationError("Password is required".to_string()));
        }

        let outcome = self.api.login(password).await?;
        match &outcome {
            LoginOutcome::Authenticated => info!("logged in"),
            LoginOutcome::LockedOut {
                remaining_seconds, ..
            } => {
                warn!(remaining_seconds, "login locked out by backend");
                self.lockout = Some(Lockout::starting_at(now, *remaining_seconds));
            }
            LoginOutcome::Rejected { .. } => warn!("login rejected"),
        }
        Ok(outcome)
    }

    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.api.logout().await
    }

    pub async fn is_authenticated(&self) -> Result<bool, ServiceError> {
        self.api.check_auth().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockApi;
    use assert_matches::assert_matches;
    use chrono::Duration;

    #[tokio::test]
    async fn lockout_blocks_further_attempts_until_expiry() {
        let mut api = MockApi::new();
        let mut calls = mockall::Sequence::new();
        api.expect_login()
            .times(1)
            .in_sequence(&mut calls)
            .returning(|_| {
                Ok(LoginOutcome::LockedOut {
                    message: "Too many failed attempts".into(),
                    remaining_seconds: 120,
                })
            });
        api.expect_login()
            .times(1)
            .in_sequence(&mut calls)
            .returning(|_| Ok(LoginOutcome::Authenticated));

        let mut gate = LoginGate::new(Arc::new(api));
        let start = Utc::now();

        let outcome = gate.attempt_at("wrong", start).await.unwrap();
        assert_matches!(outcome, LoginOutcome::LockedOut { remaining_seconds: 120, .. });

        let blocked = gate
            .attempt_at("MIAMI", start + Duration::seconds(30))
            .await
            .unwrap_err();
        assert_matches!(blocked, ServiceError::LockedOut { remaining_seconds: 90, ref message } if message.ends_with("1:30"));

        let outcome = gate
            .attempt_at("MIAMI", start + Duration::seconds(121))
            .await
            .unwrap();
        assert_eq!(outcome, LoginOutcome::Authenticated);
        assert!(gate.lockout().is_none());
    }

    #[tokio::test]
    async fn empty_password_never_reaches_backend() {
        let mut api = MockApi::new();
        api.expect_login().never();
        let mut gate = LoginGate::new(Arc::new(api));
        assert_matches!(gate.attempt("").await, Err(ServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn remembered_lockout_is_honoured() {
        let mut api = MockApi::new();
        api.expect_login().never();
        let now = Utc::now();
        let mut gate = LoginGate::with_lockout(Arc::new(api), Some(now + Duration::seconds(45)));
        assert_eq!(gate.remaining_at(now), Some(45));
        assert_matches!(
            gate.attempt_at("pw", now).await,
            Err(ServiceError::LockedOut { remaining_seconds: 45, .. })
        );
    }
}
