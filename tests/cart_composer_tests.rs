//! Tests for the Cart Composer's batch policy
//!
//! These tests verify:
//! - The variation-required flag overriding partial success
//! - Silent skips for unknown products and unresolved variants
//! - Success counting and the cart link
//! - The full presenter -> tracker -> submission -> composer flow

use fbt::{
    add_all, present, AddAllOutcome, Cart, CompanionList, InMemoryCart, InMemoryCatalog, Product,
    ProductId, ProductKind, SelectionEvent, SubmissionItem, Variant, VariationId, WidgetSettings,
};
use std::collections::BTreeMap;

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        Product {
            id: ProductId(1),
            name: "Mug".to_string(),
            kind: ProductKind::Simple,
            price: 5.0,
            variants: vec![],
        },
        Product {
            id: ProductId(2),
            name: "Shirt".to_string(),
            kind: ProductKind::Variable,
            price: 20.0,
            variants: vec![
                Variant {
                    id: VariationId(201),
                    price: 18.0,
                    attributes: BTreeMap::from([(
                        "attribute_size".to_string(),
                        "S".to_string(),
                    )]),
                },
                Variant {
                    id: VariationId(202),
                    price: 22.0,
                    attributes: BTreeMap::from([(
                        "attribute_size".to_string(),
                        "M".to_string(),
                    )]),
                },
            ],
        },
        Product {
            id: ProductId(3),
            name: "Coaster".to_string(),
            kind: ProductKind::Simple,
            price: 3.0,
            variants: vec![],
        },
    ])
}

fn item(id: u64, variations: &[(&str, &str)]) -> SubmissionItem {
    SubmissionItem {
        product_id: ProductId(id),
        variations: variations
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn test_all_resolvable_entries_are_added() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new().with_url("https://shop.example/cart");
    let submission = vec![item(1, &[]), item(2, &[("size", "M")]), item(3, &[])];

    let outcome = add_all(&catalog, &mut cart, &submission);
    match outcome {
        AddAllOutcome::Added { count, cart_url } => {
            assert_eq!(count, 3);
            assert_eq!(cart_url, "https://shop.example/cart");
        }
        other => panic!("expected Added, got {:?}", other),
    }
    assert_eq!(cart.lines()[1].variation_id, Some(VariationId(202)));
}

#[test]
fn test_missing_variation_fails_whole_batch() {
    // Valid simple item plus a bare variable item: the aggregate result
    // is a failure even though the simple item went through
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    let submission = vec![item(1, &[]), item(2, &[])];

    assert_eq!(add_all(&catalog, &mut cart, &submission), AddAllOutcome::VariationRequired);
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn test_missing_variation_beats_any_success_count() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    let submission = vec![
        item(1, &[]),
        item(3, &[]),
        item(2, &[]),
        item(2, &[("size", "S")]),
    ];

    assert_eq!(add_all(&catalog, &mut cart, &submission), AddAllOutcome::VariationRequired);
}

#[test]
fn test_unknown_products_do_not_poison_the_batch() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    let submission = vec![item(404, &[]), item(1, &[])];

    assert!(matches!(
        add_all(&catalog, &mut cart, &submission),
        AddAllOutcome::Added { count: 1, .. }
    ));
}

#[test]
fn test_unresolved_variant_skipped_without_flag() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    let submission = vec![item(2, &[("size", "XXL")]), item(1, &[])];

    // The shirt is skipped silently; only the mug counts
    assert!(matches!(
        add_all(&catalog, &mut cart, &submission),
        AddAllOutcome::Added { count: 1, .. }
    ));
}

#[test]
fn test_empty_submission_is_generic_failure() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    assert_eq!(add_all(&catalog, &mut cart, &vec![]), AddAllOutcome::NothingAdded);
}

#[test]
fn test_case_insensitive_server_side_resolution() {
    let catalog = catalog();
    let mut cart = InMemoryCart::new();
    let submission = vec![item(2, &[("size", "m")])];

    assert!(matches!(
        add_all(&catalog, &mut cart, &submission),
        AddAllOutcome::Added { count: 1, .. }
    ));
    assert_eq!(cart.lines()[0].variation_id, Some(VariationId(202)));
}

#[test]
fn test_full_flow_from_rendered_view() {
    // Presenter -> tracker -> submission -> composer, the way the widget
    // actually runs end to end
    let catalog = catalog();
    let settings = WidgetSettings {
        enabled: true,
        checked_by_default: true,
        ..WidgetSettings::default()
    };
    let view = present(&catalog, &settings, ProductId(1), &CompanionList::parse("2,3")).unwrap();
    let mut state = view.selection_state();

    // Pre-filled but unconfirmed: the tracker refuses to enable
    assert!(!state.compute().add_all_enabled);

    let computation = state.apply(SelectionEvent::AttributeChanged {
        product_id: ProductId(2),
        attribute: "size".to_string(),
        value: "M".to_string(),
    });
    assert!(computation.add_all_enabled);
    assert_eq!(computation.total, 5.0 + 22.0 + 3.0);

    let mut cart = InMemoryCart::new();
    let outcome = add_all(&catalog, &mut cart, &state.submission());
    assert!(matches!(outcome, AddAllOutcome::Added { count: 3, .. }));
}
