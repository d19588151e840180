#![allow(dead_code)]

use std::sync::Arc;

use order_desk::{
    api::{ApiClient, OrderDeskApi},
    config::AppConfig,
    labels::LabelFile,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock order-management backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::new(self.server.uri());
        config.request_timeout_secs = 5;
        config
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("client builds against mock server")
    }

    pub fn api(&self) -> Arc<dyn OrderDeskApi> {
        Arc::new(self.client())
    }

    /// Serves `body` for `GET {route}`.
    pub async fn serve_json(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn requests_to(&self, verb: &str, route: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == verb && req.url.path() == route)
            .collect()
    }
}

pub fn inventory_json(chocolate: i64, vanilla: i64) -> Value {
    json!([
        {"sku": "GMPROCHOC2-cs", "product": "Whey Protein", "size": "2lb", "flavor": "Chocolate", "unitsCs": "6/cs", "quantity": chocolate},
        {"sku": "GMPROVAN2-cs", "product": "Whey Protein", "size": "2lb", "flavor": "Vanilla", "unitsCs": "6/cs", "quantity": vanilla},
        {"sku": "GMCREAT300-cs", "product": "Creatine", "size": "300g", "flavor": "Unflavored", "unitsCs": "12/cs", "quantity": 0}
    ])
}

pub fn addresses_json() -> Value {
    json!([
        {"id": 3, "nickname": "Warehouse", "companyName": "Gains Fulfilment", "addressLine1": "1200 NW 22nd St",
         "addressLine2": null, "city": "Miami", "state": "FL", "zipCode": "33142", "phone": "", "email": ""},
        {"id": 1, "nickname": "HQ", "companyName": "Gains Nutrition", "addressLine1": "801 Brickell Ave",
         "addressLine2": "Suite 900", "city": "Miami", "state": "FL", "zipCode": "33131", "phone": "3055550100", "email": "ops@example.com"}
    ])
}

pub fn orders_json(pos: &[&str]) -> Value {
    Value::Array(
        pos.iter()
            .enumerate()
            .map(|(i, po)| {
                json!({
                    "order_id": i + 1,
                    "created_at": "Mon, 06 Jan 2025 15:04:05 GMT",
                    "purchase_order_number": po,
                    "items": [{"sku": "GMPROCHOC2-cs", "product": "Whey Protein", "size": "2lb", "flavor": "Chocolate", "quantity": 1}],
                    "has_attachment": true,
                    "shipping_method": "FedEx Ground",
                    "order_status": "Processing"
                })
            })
            .collect(),
    )
}

pub fn pdf_label(name: &str) -> LabelFile {
    LabelFile::new(name, "application/pdf", format!("%PDF-1.4 {}", name).into_bytes())
        .expect("pdf labels are supported")
}
