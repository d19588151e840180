use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::OrderDeskApi;
use crate::errors::ServiceError;
use crate::models::DatabaseInfo;

const BACKUP_DONE: &str = "Backup completed";

#[derive(Clone)]
pub struct DatabaseService {
    api: Arc<dyn OrderDeskApi>,
}

impl DatabaseService {
    pub fn new(api: Arc<dyn OrderDeskApi>) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn info(&self) -> Result<DatabaseInfo, ServiceError> {
        self.api.database_info().await
    }

    /// Asks the backend to zip and send the database; returns its message.
    #[instrument(skip(self))]
    pub async fn backup(&self) -> Result<String, ServiceError> {
        let ack = self.api.backup_database().await?;
        let message = ack.text_or(BACKUP_DONE).to_string();
        info!(%message, "database backup requested");
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockApi;
    use crate::models::ApiMessage;

    #[tokio::test]
    async fn backup_falls_back_to_default_message() {
        let mut api = MockApi::new();
        api.expect_backup_database()
            .returning(|| Ok(ApiMessage::default()));
        let service = DatabaseService::new(Arc::new(api));
        assert_eq!(service.backup().await.unwrap(), BACKUP_DONE);
    }
}
