use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ShippingAddress, ShippingMethod};

/// Lifecycle status the back office tracks for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Cancelled,
    Voided,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Only orders still in processing may be voided or have their status changed.
    pub fn is_open(self) -> bool {
        self == OrderStatus::Processing
    }

    /// Shipped orders are locked; everything else that is not live may be purged.
    pub fn is_deletable(self) -> bool {
        matches!(self, OrderStatus::Processing | OrderStatus::Voided)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemSummary {
    pub sku: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub flavor: String,
    pub quantity: i64,
}

/// One entry of `GET /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    pub purchase_order_number: String,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub items: Vec<OrderItemSummary>,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
}

impl OrderRecord {
    /// Missing status reads as processing, matching the order history view.
    pub fn status(&self) -> OrderStatus {
        self.order_status.unwrap_or_default()
    }

    /// Parses `created_at`, which the backend emits either as RFC 3339 or HTTP-date.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_rfc2822(raw))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn total_cases(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// File name used when saving the order's label attachment.
    pub fn attachment_file_name(&self) -> String {
        let safe: String = self
            .purchase_order_number
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("PO_{}_shipping_labels.pdf", safe)
    }
}

/// Line of the order creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderLine {
    pub product_sku: String,
    pub quantity: u32,
}

/// JSON carried in the `data` part of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub purchase_order_number: String,
    pub shipping_address_id: i64,
    pub shipping_method: ShippingMethod,
    pub items: Vec<NewOrderLine>,
}

/// Body of `PUT /api/orders/:id/update-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> OrderRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_status_reads_as_processing() {
        let order = record(r#"{"order_id":1,"purchase_order_number":"PO-1"}"#);
        assert_eq!(order.status(), OrderStatus::Processing);
        assert!(order.status().is_open());
    }

    #[test]
    fn unknown_status_does_not_break_parsing() {
        let order = record(r#"{"order_id":1,"purchase_order_number":"PO-1","order_status":"Returned"}"#);
        assert_eq!(order.status(), OrderStatus::Unknown);
        assert!(!order.status().is_deletable());
    }

    #[test]
    fn parses_http_date_timestamps() {
        let order = record(
            r#"{"order_id":1,"purchase_order_number":"PO-1","created_at":"Tue, 15 Oct 2024 12:30:00 GMT"}"#,
        );
        let ts = order.created_at_utc().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-10-15T12:30:00+00:00");
    }

    #[test]
    fn attachment_name_is_filesystem_safe() {
        let order = record(r#"{"order_id":1,"purchase_order_number":"PO 12/3"}"#);
        assert_eq!(order.attachment_file_name(), "PO_PO_12_3_shipping_labels.pdf");
    }

    #[test]
    fn payload_serializes_shipping_method_by_name() {
        let payload = NewOrder {
            purchase_order_number: "PO-9".into(),
            shipping_address_id: 3,
            shipping_method: ShippingMethod::Fedex2Day,
            items: vec![NewOrderLine {
                product_sku: "GMPROCHOC2-cs".into(),
                quantity: 2,
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["shipping_method"], "FedEx 2Day");
        assert_eq!(json["items"][0]["product_sku"], "GMPROCHOC2-cs");
    }

    #[test]
    fn status_serializes_as_display_name() {
        let update = StatusUpdate {
            status: OrderStatus::Shipped,
            password: "secret".into(),
        };
        assert_eq!(serde_json::to_value(&update).unwrap()["status"], "Shipped");
    }
}
