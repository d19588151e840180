mod common;

use assert_matches::assert_matches;
use common::{pdf_label, TestBackend};
use order_desk::{
    api::{ApiClient, OrderDeskApi, StoredSession},
    errors::ServiceError,
    models::{LoginOutcome, NewOrder, NewOrderLine, OrderStatus, ShippingMethod, StatusUpdate},
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, header_regex, method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn create_order_sends_data_field_and_one_attachment_per_label() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Order created successfully"})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let order = NewOrder {
        purchase_order_number: "PO-4411".to_string(),
        shipping_address_id: 3,
        shipping_method: ShippingMethod::Fedex2Day,
        items: vec![NewOrderLine {
            product_sku: "GMPROCHOC2-cs".to_string(),
            quantity: 2,
        }],
    };
    let labels = vec![pdf_label("one.pdf"), pdf_label("two.pdf")];

    let ack = backend.client().create_order(&order, &labels).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Order created successfully"));

    let requests = backend.requests_to("POST", "/api/orders").await;
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains(r#"name="data""#));
    assert!(body.contains(r#""purchase_order_number":"PO-4411""#));
    assert!(body.contains(r#""shipping_method":"FedEx 2Day""#));
    assert_eq!(body.matches(r#"name="attachment""#).count(), 2);
    assert!(body.contains(r#"filename="two.pdf""#));
    assert!(body.contains("%PDF-1.4 one.pdf"));
}

#[tokio::test]
async fn process_labels_posts_files_parts() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/process-labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"processedFiles": [{"name": "a.pdf"}]})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let processed = backend
        .client()
        .process_labels(&[pdf_label("a.pdf")])
        .await
        .unwrap();
    assert_eq!(processed.processed_files.len(), 1);

    let requests = backend.requests_to("POST", "/api/process-labels").await;
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains(r#"name="files"; filename="a.pdf""#));
}

#[tokio::test]
async fn backend_error_text_is_surfaced() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Insufficient inventory for GMPROCHOC2-cs"})),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/shipping-addresses/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let order = NewOrder {
        purchase_order_number: "PO-1".to_string(),
        shipping_address_id: 1,
        shipping_method: ShippingMethod::default(),
        items: vec![],
    };

    let err = client.create_order(&order, &[]).await.unwrap_err();
    assert_matches!(err, ServiceError::Api { status: 400, .. });
    assert_eq!(err.user_message(), "Insufficient inventory for GMPROCHOC2-cs");

    let err = client.list_products().await.unwrap_err();
    assert_eq!(err.user_message(), "database is locked");

    let err = client.get_address(77).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(ref message) if message == "404 Not Found");
}

#[tokio::test]
async fn login_reports_lockout_rejection_and_success() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"password": "locked"})))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "success": false,
            "error": "Too many failed attempts. Please try again later.",
            "lockout": true,
            "remaining_seconds": 840
        })))
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"password": "wrong"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"success": false, "error": "Invalid password"})))
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"password": "MIAMI"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&backend.server)
        .await;

    let client = backend.client();
    assert_matches!(
        client.login("locked").await.unwrap(),
        LoginOutcome::LockedOut { remaining_seconds: 840, .. }
    );
    assert_eq!(
        client.login("wrong").await.unwrap(),
        LoginOutcome::Rejected {
            message: "Invalid password".to_string()
        }
    );
    assert_eq!(client.login("MIAMI").await.unwrap(), LoginOutcome::Authenticated);
}

#[tokio::test]
async fn session_cookie_is_kept_and_restorable() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"success": true})),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/check-auth"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/check-auth"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"authenticated": false})))
        .mount(&backend.server)
        .await;

    let fresh = backend.client();
    assert!(!fresh.check_auth().await.unwrap());

    assert_eq!(fresh.login("MIAMI").await.unwrap(), LoginOutcome::Authenticated);
    assert!(fresh.check_auth().await.unwrap());

    let saved = StoredSession::new(fresh.session_cookies());
    assert_eq!(saved.cookies, vec!["session=abc123".to_string()]);

    let restored = ApiClient::with_session(&backend.config(), Some(&saved)).unwrap();
    assert!(restored.check_auth().await.unwrap());
}

#[tokio::test]
async fn admin_endpoints_use_expected_paths_and_bodies() {
    let backend = TestBackend::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/inventory/GMPROCHOC2-cs"))
        .and(body_json(json!({"quantity": 40})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sku": "GMPROCHOC2-cs", "quantity": 40})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/orders/12/update-status"))
        .and(body_json(json!({"status": "Shipped", "password": "admin"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Order status updated to Shipped"})))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/orders/12/delete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    assert_eq!(client.update_inventory("GMPROCHOC2-cs", 40).await.unwrap().quantity, 40);

    let ack = client
        .update_order_status(
            12,
            &StatusUpdate {
                status: OrderStatus::Shipped,
                password: "admin".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Order status updated to Shipped"));

    assert_eq!(client.delete_order(12).await.unwrap().message, None);
}
