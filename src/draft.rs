//! The in-progress order assembled across the checkout steps.

use serde::Serialize;
use tracing::debug;

use crate::errors::ServiceError;
use crate::labels::LabelSet;
use crate::models::{InventoryItem, NewOrder, NewOrderLine, ShippingAddress, ShippingMethod};

/// A product row of the order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftLine {
    pub sku: String,
    pub product: String,
    pub size: String,
    pub flavor: String,
    pub units_per_case: String,
    available: u32,
    cases: u32,
}

impl DraftLine {
    fn from_item(item: &InventoryItem) -> Self {
        Self {
            sku: item.sku.clone(),
            product: item.product.clone(),
            size: item.size.clone(),
            flavor: item.flavor.clone(),
            units_per_case: item.units_per_case.clone(),
            available: item.available_cases(),
            cases: 0,
        }
    }

    pub fn cases(&self) -> u32 {
        self.cases
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    /// Out-of-stock rows cannot be edited and stay at zero.
    pub fn is_locked(&self) -> bool {
        self.available == 0
    }

    fn set_cases(&mut self, requested: i64) -> u32 {
        self.cases = clamp_cases(requested, self.available);
        self.cases
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} of {} - {} ({})",
            self.cases,
            if self.cases == 1 { "case" } else { "cases" },
            self.product,
            self.flavor,
            self.size
        )
    }
}

/// Clamps a requested case count into `[0, available]`.
pub fn clamp_cases(requested: i64, available: u32) -> u32 {
    let bounded = requested.clamp(0, i64::from(available));
    u32::try_from(bounded).unwrap_or(0)
}

/// Reads free-form quantity input the way a numeric form field does:
/// leading whitespace and sign, then leading digits; anything else is zero.
pub fn parse_case_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    po: String,
    address: Option<ShippingAddress>,
    lines: Vec<DraftLine>,
    shipping_method: ShippingMethod,
    labels: LabelSet,
}

impl OrderDraft {
    /// Empty draft with one zero-case line per inventory row.
    pub fn from_inventory(items: &[InventoryItem]) -> Self {
        Self {
            lines: items.iter().map(DraftLine::from_item).collect(),
            ..Self::default()
        }
    }

    pub fn po(&self) -> &str {
        &self.po
    }

    pub fn set_po(&mut self, po: impl Into<String>) {
        self.po = po.into();
    }

    pub fn address(&self) -> Option<&ShippingAddress> {
        self.address.as_ref()
    }

    pub fn select_address(&mut self, address: Option<ShippingAddress>) {
        self.address = address;
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn line(&self, sku: &str) -> Option<&DraftLine> {
        self.lines.iter().find(|line| line.sku == sku)
    }

    /// Sets the case count for `sku`, clamped to what is in stock. Returns the stored value.
    pub fn set_cases(&mut self, sku: &str, requested: i64) -> Result<u32, ServiceError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.sku == sku)
            .ok_or_else(|| ServiceError::NotFound(format!("SKU {} is not in inventory", sku)))?;
        let stored = line.set_cases(requested);
        if i64::from(stored) != requested {
            debug!(sku, requested, stored, "clamped case count");
        }
        Ok(stored)
    }

    /// Same as [`OrderDraft::set_cases`] for raw text input.
    pub fn set_cases_input(&mut self, sku: &str, raw: &str) -> Result<u32, ServiceError> {
        self.set_cases(sku, parse_case_input(raw))
    }

    /// Summed in `u64` so lines near `u32::MAX` cannot overflow.
    pub fn total_cases(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.cases)).sum()
    }

    pub fn ordered_lines(&self) -> impl Iterator<Item = &DraftLine> {
        self.lines.iter().filter(|line| line.cases > 0)
    }

    pub fn has_items(&self) -> bool {
        self.ordered_lines().next().is_some()
    }

    /// One line per product row: stock, ordered cases and a lock marker.
    pub fn summary_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| {
                let lock = if line.is_locked() { " [out of stock]" } else { "" };
                format!(
                    "{:<12} {} - {} ({}, {}) {}/{} cases{}",
                    line.sku,
                    line.product,
                    line.flavor,
                    line.size,
                    line.units_per_case,
                    line.cases,
                    line.available,
                    lock
                )
            })
            .collect()
    }

    pub fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut LabelSet {
        &mut self.labels
    }

    /// Builds the creation payload. Requires a selected address.
    pub fn to_new_order(&self) -> Result<NewOrder, ServiceError> {
        let address = self.address.as_ref().ok_or_else(|| {
            ServiceError::ValidationError("Please select a shipping address".to_string())
        })?;
        Ok(NewOrder {
            purchase_order_number: self.po.trim().to_string(),
            shipping_address_id: address.id,
            shipping_method: self.shipping_method,
            items: self
                .ordered_lines()
                .map(|line| NewOrderLine {
                    product_sku: line.sku.clone(),
                    quantity: line.cases,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(sku: &str, quantity: i64) -> InventoryItem {
        InventoryItem {
            sku: sku.to_string(),
            product: "Whey Protein".to_string(),
            size: "2lb".to_string(),
            flavor: "Chocolate".to_string(),
            units_per_case: "6/cs".to_string(),
            quantity,
        }
    }

    pub fn address(id: i64, nickname: &str) -> ShippingAddress {
        ShippingAddress {
            id,
            nickname: nickname.to_string(),
            company_name: format!("{} Co", nickname),
            address_line1: "801 S Miami Ave".to_string(),
            address_line2: None,
            city: "Miami".to_string(),
            state: "FL".to_string(),
            zip_code: "33130".to_string(),
            phone: "305-555-0100".to_string(),
            email: format!("{}@example.com", nickname.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{address, item};
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("3", 3)]
    #[case("  7", 7)]
    #[case("2.9", 2)]
    #[case("4 cases", 4)]
    #[case("-2", -2)]
    #[case("+5", 5)]
    #[case("", 0)]
    #[case("abc", 0)]
    #[case("99999999999999999999999", i64::MAX)]
    fn parses_like_a_number_field(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_case_input(raw), expected);
    }

    #[rstest]
    #[case(-5, 10, 0)]
    #[case(4, 10, 4)]
    #[case(12, 10, 10)]
    #[case(3, 0, 0)]
    fn clamps_into_available_range(#[case] requested: i64, #[case] available: u32, #[case] expected: u32) {
        assert_eq!(clamp_cases(requested, available), expected);
    }

    #[test]
    fn zero_stock_line_is_locked_at_zero() {
        let mut draft = OrderDraft::from_inventory(&[item("EMPTY-cs", 0)]);
        assert!(draft.line("EMPTY-cs").unwrap().is_locked());
        assert_eq!(draft.set_cases("EMPTY-cs", 5).unwrap(), 0);
        assert_eq!(draft.set_cases_input("EMPTY-cs", "1").unwrap(), 0);
        assert_eq!(draft.total_cases(), 0);
    }

    #[test]
    fn unknown_sku_is_not_found() {
        let mut draft = OrderDraft::from_inventory(&[item("A-cs", 3)]);
        assert!(matches!(draft.set_cases("B-cs", 1), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn payload_only_carries_ordered_lines() {
        let mut draft = OrderDraft::from_inventory(&[item("A-cs", 3), item("B-cs", 5)]);
        draft.set_po("  PO-100 ");
        draft.select_address(Some(address(4, "HQ")));
        draft.set_cases("B-cs", 2).unwrap();

        let payload = draft.to_new_order().unwrap();
        assert_eq!(payload.purchase_order_number, "PO-100");
        assert_eq!(payload.shipping_address_id, 4);
        assert_eq!(payload.items, vec![NewOrderLine { product_sku: "B-cs".into(), quantity: 2 }]);
    }

    #[test]
    fn total_of_huge_stock_lines_does_not_overflow() {
        let mut draft = OrderDraft::from_inventory(&[item("A-cs", 3_000_000_000), item("B-cs", 3_000_000_000)]);
        draft.set_cases("A-cs", 3_000_000_000).unwrap();
        draft.set_cases("B-cs", 3_000_000_000).unwrap();
        assert_eq!(draft.total_cases(), 6_000_000_000);

        let labels = draft.labels().reconcile(draft.total_cases());
        assert!(!labels.is_match());
        assert_eq!(labels.cases, 6_000_000_000);
    }

    #[test]
    fn describe_pluralizes_cases() {
        let mut draft = OrderDraft::from_inventory(&[item("A-cs", 3)]);
        draft.set_cases("A-cs", 1).unwrap();
        assert_eq!(draft.line("A-cs").unwrap().describe(), "1 case of Whey Protein - Chocolate (2lb)");
    }

    proptest! {
        #[test]
        fn stored_cases_never_leave_available_range(
            available in -10i64..500,
            edits in proptest::collection::vec(any::<i64>(), 1..20),
        ) {
            let mut draft = OrderDraft::from_inventory(&[item("SKU-cs", available)]);
            let cap = u32::try_from(available.max(0)).unwrap();
            for requested in edits {
                let stored = draft.set_cases("SKU-cs", requested).unwrap();
                prop_assert!(stored <= cap);
                prop_assert_eq!(draft.line("SKU-cs").unwrap().cases(), stored);
            }
        }

        #[test]
        fn text_edits_never_leave_available_range(available in 0i64..200, raw in "\\PC{0,12}") {
            let mut draft = OrderDraft::from_inventory(&[item("SKU-cs", available)]);
            let stored = draft.set_cases_input("SKU-cs", &raw).unwrap();
            prop_assert!(i64::from(stored) <= available);
        }
    }
}
