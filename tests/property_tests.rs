use order_desk::{
    draft::{clamp_cases, OrderDraft},
    labels::{LabelFile, LabelSet},
    models::InventoryItem,
};
use proptest::prelude::*;

fn item(sku: &str, quantity: i64) -> InventoryItem {
    InventoryItem {
        sku: sku.to_string(),
        product: "Whey Protein".to_string(),
        size: "2lb".to_string(),
        flavor: "Chocolate".to_string(),
        units_per_case: "6/cs".to_string(),
        quantity,
    }
}

fn label(index: usize, pdf: bool) -> LabelFile {
    if pdf {
        LabelFile::new(format!("{index}.pdf"), "application/pdf", vec![1]).unwrap()
    } else {
        LabelFile::new(format!("{index}.png"), "image/png", vec![2]).unwrap()
    }
}

proptest! {
    #[test]
    fn clamp_is_idempotent(requested in any::<i64>(), available in any::<u32>()) {
        let once = clamp_cases(requested, available);
        prop_assert_eq!(clamp_cases(i64::from(once), available), once);
        prop_assert!(once <= available);
    }

    #[test]
    fn total_cases_never_exceeds_stock(
        stock in proptest::collection::vec(0i64..50, 1..6),
        requests in proptest::collection::vec(any::<i64>(), 1..6),
    ) {
        let items: Vec<_> = stock.iter().enumerate().map(|(i, q)| item(&format!("SKU{i}"), *q)).collect();
        let mut draft = OrderDraft::from_inventory(&items);
        for (i, requested) in requests.iter().enumerate() {
            let _ = draft.set_cases(&format!("SKU{}", i % items.len()), *requested);
        }
        let cap: i64 = stock.iter().sum();
        prop_assert!(draft.total_cases() <= u64::try_from(cap).unwrap());
    }

    #[test]
    fn label_set_never_holds_mixed_types(batches in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 0..4), 1..6)) {
        let mut set = LabelSet::new();
        let mut counter = 0;
        for batch in batches {
            let before = set.len();
            let files: Vec<_> = batch.iter().map(|pdf| { counter += 1; label(counter, *pdf) }).collect();
            let size = files.len();
            match set.add_batch(files) {
                Ok(len) => prop_assert_eq!(len, before + size),
                Err(_) => prop_assert_eq!(set.len(), before),
            }
            if let Some(kind) = set.kind() {
                prop_assert!(set.files().iter().all(|f| f.kind() == kind));
            }
        }
    }
}
