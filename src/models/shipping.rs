use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Carrier services the backend can book; serialized by display name.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ShippingMethod {
    #[default]
    #[serde(rename = "FedEx Ground")]
    #[strum(to_string = "FedEx Ground", serialize = "fedex-ground")]
    FedexGround,
    #[serde(rename = "FedEx Home Delivery")]
    #[strum(to_string = "FedEx Home Delivery", serialize = "fedex-home-delivery")]
    FedexHomeDelivery,
    #[serde(rename = "FedEx 2Day")]
    #[strum(to_string = "FedEx 2Day", serialize = "fedex-2day")]
    Fedex2Day,
    #[serde(rename = "FedEx Express Saver")]
    #[strum(to_string = "FedEx Express Saver", serialize = "fedex-express-saver")]
    FedexExpressSaver,
    #[serde(rename = "FedEx Standard Overnight")]
    #[strum(to_string = "FedEx Standard Overnight", serialize = "fedex-standard-overnight")]
    FedexStandardOvernight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn default_is_ground() {
        assert_eq!(ShippingMethod::default(), ShippingMethod::FedexGround);
        assert_eq!(ShippingMethod::default().to_string(), "FedEx Ground");
    }

    #[test]
    fn parses_display_name_and_slug() {
        assert_eq!(
            ShippingMethod::from_str("FedEx 2Day").unwrap(),
            ShippingMethod::Fedex2Day
        );
        assert_eq!(
            ShippingMethod::from_str("fedex-standard-overnight").unwrap(),
            ShippingMethod::FedexStandardOvernight
        );
        assert!(ShippingMethod::from_str("UPS Ground").is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        for method in ShippingMethod::iter() {
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method));
        }
    }
}
