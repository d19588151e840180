use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    cookie::{CookieStore, Jar},
    multipart::{Form, Part},
    Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::{OrderDeskApi, StoredSession};
use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::labels::LabelFile;
use crate::models::{
    auth::LoginResponse, AddressInput, ApiMessage, AuthStatus, BulkProductUpdate, DatabaseInfo,
    InventoryItem, InventoryLevel, LoginOutcome, NewOrder, OrderRecord, ProcessedLabels, Product,
    ProductDetails, ProductInput, ShippingAddress, StatusUpdate,
};

const DEFAULT_LOGIN_REJECTION: &str = "Invalid password. Please try again.";

/// reqwest-backed client for the order-management REST API.
///
/// Every request carries the session cookie held in the client's jar.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::with_session(config, None)
    }

    /// Builds a client, seeding the cookie jar from a saved session.
    pub fn with_session(
        config: &AppConfig,
        session: Option<&StoredSession>,
    ) -> Result<Self, ServiceError> {
        let base = Url::parse(&config.api_base_url)?;
        if base.cannot_be_a_base() {
            return Err(ServiceError::ConfigError(format!(
                "API base URL '{}' cannot carry paths",
                base
            )));
        }

        let jar = Arc::new(Jar::default());
        if let Some(session) = session {
            for cookie in &session.cookies {
                jar.add_cookie_str(&format!("{}; Path=/", cookie), &base);
            }
            debug!(cookies = session.cookies.len(), "restored session cookies");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("order-desk/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http, base, jar })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Cookies currently held for the backend, as `name=value` pairs.
    pub fn session_cookies(&self) -> Vec<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|header| header.to_str().ok().map(str::to_owned))
            .map(|header| {
                header
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| !pair.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ServiceError::ConfigError("API base URL cannot carry paths".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::from_response(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn read_ack(response: Response) -> Result<ApiMessage, ServiceError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::from_response(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(ApiMessage::default());
        }
        Ok(serde_json::from_str(&body).unwrap_or(ApiMessage {
            message: Some(body.trim().to_string()),
        }))
    }

    fn label_part(label: &LabelFile) -> Result<Part, ServiceError> {
        Ok(Part::bytes(label.bytes().to_vec())
            .file_name(label.name().to_string())
            .mime_str(label.content_type())?)
    }
}

#[async_trait]
impl OrderDeskApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        let response = self.http.get(self.endpoint(&["api", "inventory"])?).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn update_inventory(&self, sku: &str, quantity: u32) -> Result<InventoryLevel, ServiceError> {
        let response = self
            .http
            .put(self.endpoint(&["api", "inventory", sku])?)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn list_addresses(&self) -> Result<Vec<ShippingAddress>, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "shipping-addresses"])?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn get_address(&self, id: i64) -> Result<ShippingAddress, ServiceError> {
        let id = id.to_string();
        let response = self
            .http
            .get(self.endpoint(&["api", "shipping-addresses", &id])?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    async fn create_address(&self, input: &AddressInput) -> Result<ShippingAddress, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "shipping-addresses"])?)
            .json(input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, input))]
    async fn update_address(
        &self,
        id: i64,
        input: &AddressInput,
    ) -> Result<ShippingAddress, ServiceError> {
        let id = id.to_string();
        let response = self
            .http
            .put(self.endpoint(&["api", "shipping-addresses", &id])?)
            .json(input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn delete_address(&self, id: i64) -> Result<(), ServiceError> {
        let id = id.to_string();
        let response = self
            .http
            .delete(self.endpoint(&["api", "shipping-addresses", &id])?)
            .send()
            .await?;
        Self::read_ack(response).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        let response = self.http.get(self.endpoint(&["api", "products"])?).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn product_details(&self) -> Result<Vec<ProductDetails>, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "products", "full-details"])?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    async fn create_product(&self, input: &ProductInput) -> Result<ApiMessage, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "products"])?)
            .json(input)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, sku: &str) -> Result<ApiMessage, ServiceError> {
        let response = self
            .http
            .delete(self.endpoint(&["api", "products", sku])?)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self, request), fields(products = request.products.len()))]
    async fn bulk_update_products(
        &self,
        request: &BulkProductUpdate,
    ) -> Result<ApiMessage, ServiceError> {
        let response = self
            .http
            .put(self.endpoint(&["api", "products", "bulk-update"])?)
            .json(request)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ServiceError> {
        let response = self.http.get(self.endpoint(&["api", "orders"])?).send().await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, labels), fields(count = labels.len()))]
    async fn process_labels(&self, labels: &[LabelFile]) -> Result<ProcessedLabels, ServiceError> {
        let mut form = Form::new();
        for label in labels {
            form = form.part("files", Self::label_part(label)?);
        }
        let response = self
            .http
            .post(self.endpoint(&["api", "process-labels"])?)
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self, order, labels), fields(po = %order.purchase_order_number, labels = labels.len()))]
    async fn create_order(
        &self,
        order: &NewOrder,
        labels: &[LabelFile],
    ) -> Result<ApiMessage, ServiceError> {
        let mut form = Form::new().text("data", serde_json::to_string(order)?);
        for label in labels {
            form = form.part("attachment", Self::label_part(label)?);
        }
        let response = self
            .http
            .post(self.endpoint(&["api", "orders"])?)
            .multipart(form)
            .send()
            .await?;
        let ack = Self::read_ack(response).await?;
        info!("order created");
        Ok(ack)
    }

    #[instrument(skip(self))]
    async fn download_attachment(&self, order_id: i64) -> Result<Vec<u8>, ServiceError> {
        let id = order_id.to_string();
        let response = self
            .http
            .get(self.endpoint(&["api", "orders", &id, "attachment"])?)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_response(status, &body));
        }
        Ok(response.bytes().await?.to_vec())
    }

    #[instrument(skip(self))]
    async fn void_order(&self, order_id: i64) -> Result<ApiMessage, ServiceError> {
        let id = order_id.to_string();
        let response = self
            .http
            .post(self.endpoint(&["api", "orders", &id, "void"])?)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, order_id: i64) -> Result<ApiMessage, ServiceError> {
        let id = order_id.to_string();
        let response = self
            .http
            .delete(self.endpoint(&["api", "orders", &id, "delete"])?)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self, update), fields(status = %update.status))]
    async fn update_order_status(
        &self,
        order_id: i64,
        update: &StatusUpdate,
    ) -> Result<ApiMessage, ServiceError> {
        let id = order_id.to_string();
        let response = self
            .http
            .put(self.endpoint(&["api", "orders", &id, "update-status"])?)
            .json(update)
            .send()
            .await?;
        Self::read_ack(response).await
    }

    #[instrument(skip(self, password))]
    async fn login(&self, password: &str) -> Result<LoginOutcome, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "login"])?)
            .json(&json!({ "password": password }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: LoginResponse = serde_json::from_str(&body).unwrap_or_default();

        if status.is_success() && parsed.success {
            info!("login accepted");
            return Ok(LoginOutcome::Authenticated);
        }

        if status == StatusCode::TOO_MANY_REQUESTS && parsed.lockout {
            let remaining_seconds = parsed.remaining_seconds.unwrap_or(0);
            warn!(remaining_seconds, "login locked out");
            return Ok(LoginOutcome::LockedOut {
                message: parsed
                    .error
                    .unwrap_or_else(|| "Too many failed attempts".to_string()),
                remaining_seconds,
            });
        }

        if status.is_server_error() {
            return Err(ServiceError::from_response(status, &body));
        }

        warn!(status = status.as_u16(), "login rejected");
        Ok(LoginOutcome::Rejected {
            message: parsed
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOGIN_REJECTION.to_string()),
        })
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ServiceError> {
        let response = self.http.post(self.endpoint(&["api", "logout"])?).send().await?;
        Self::read_ack(response).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn check_auth(&self) -> Result<bool, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "check-auth"])?)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ServiceError::from_response(status, &body));
        }
        Ok(serde_json::from_str::<AuthStatus>(&body)
            .map(|s| s.authenticated)
            .unwrap_or(true))
    }

    #[instrument(skip(self))]
    async fn database_info(&self) -> Result<DatabaseInfo, ServiceError> {
        let response = self
            .http
            .get(self.endpoint(&["api", "database-info"])?)
            .send()
            .await?;
        Self::read_json(response).await
    }

    #[instrument(skip(self))]
    async fn backup_database(&self) -> Result<ApiMessage, ServiceError> {
        let response = self
            .http
            .post(self.endpoint(&["api", "backup-database"])?)
            .send()
            .await?;
        Self::read_ack(response).await
    }
}
