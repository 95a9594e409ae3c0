//! Cart Composer
//!
//! Turns a bundle submission into cart line items, entry by entry, and
//! reports one aggregate outcome. The composition policy is strict on
//! purpose: one missing variation selection fails the whole batch, even
//! when other entries were already added — the shopper must complete every
//! selection before the result reads as success.

use crate::catalog::Catalog;
use crate::resolver::find_matching_variation;
use crate::selection::BundleSubmission;
use crate::types::{ProductId, VariationId};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A shopper's session-scoped cart, owned by the storefront platform.
///
/// `add_item` returns false when the platform rejects the add (out of
/// stock, purchasability rules); the composer counts only true returns.
pub trait Cart {
    fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variation_id: Option<VariationId>,
        attributes: &BTreeMap<String, String>,
    ) -> bool;

    /// Link to the cart view, included in success responses
    fn cart_url(&self) -> String;

    /// Number of items currently in the cart
    fn item_count(&self) -> u32;
}

/// One line item in the in-memory cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub variation_id: Option<VariationId>,
    pub attributes: BTreeMap<String, String>,
}

/// Cart implementation for tests and the demo binary.
///
/// Products listed via [`InMemoryCart::reject`] refuse to be added, to
/// exercise the composer's failure paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCart {
    lines: Vec<CartLine>,
    rejected: Vec<ProductId>,
    url: Option<String>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent adds of `product_id` fail
    pub fn reject(&mut self, product_id: ProductId) {
        self.rejected.push(product_id);
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

impl Cart for InMemoryCart {
    fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variation_id: Option<VariationId>,
        attributes: &BTreeMap<String, String>,
    ) -> bool {
        if self.rejected.contains(&product_id) {
            return false;
        }
        self.lines.push(CartLine {
            product_id,
            quantity,
            variation_id,
            attributes: attributes.clone(),
        });
        true
    }

    fn cart_url(&self) -> String {
        self.url.clone().unwrap_or_else(|| "/cart".to_string())
    }

    fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Aggregate result of one add-all request
#[derive(Debug, Clone, PartialEq)]
pub enum AddAllOutcome {
    /// At least one entry was added and no variation was missing
    Added { count: u32, cart_url: String },
    /// Some checked variable item arrived with no selections. Overrides
    /// any partial success — the caller must not report "some added".
    VariationRequired,
    /// No missing variations, but nothing was added either
    NothingAdded,
}

/// Process a submission in order, adding one unit per resolvable entry.
///
/// Per entry: an unknown product is skipped; a variable product with no
/// selections raises the variation-required flag and is skipped; a
/// variable product whose selections resolve to no variant is skipped
/// silently; everything else is offered to the cart. The
/// variation-required flag takes priority over the success count.
pub fn add_all(catalog: &dyn Catalog, cart: &mut dyn Cart, submission: &BundleSubmission) -> AddAllOutcome {
    let mut added_count: u32 = 0;
    let mut has_unselected_variations = false;

    for item in submission {
        let Some(product) = catalog.product(item.product_id) else {
            debug!(product_id = %item.product_id, "skipping unknown product");
            continue;
        };

        let mut variation_id = None;
        if product.is_variable() {
            if item.variations.is_empty() {
                warn!(product_id = %product.id, "variable product submitted without selections");
                has_unselected_variations = true;
                continue;
            }

            variation_id = find_matching_variation(product, &item.variations);
            if variation_id.is_none() {
                debug!(product_id = %product.id, "no variant matched, skipping entry");
                continue;
            }
        }

        if cart.add_item(item.product_id, 1, variation_id, &item.variations) {
            added_count += 1;
        }
    }

    if has_unselected_variations {
        return AddAllOutcome::VariationRequired;
    }

    if added_count > 0 {
        info!(added_count, "bundle added to cart");
        AddAllOutcome::Added {
            count: added_count,
            cart_url: cart.cart_url(),
        }
    } else {
        AddAllOutcome::NothingAdded
    }
}

/// Add a single product (optionally a specific variant) to the cart.
///
/// Mirrors the single-product endpoint: a straight cart add with no
/// catalog validation — the platform decides whether the id is addable.
pub fn add_single(cart: &mut dyn Cart, product_id: ProductId, variation_id: Option<VariationId>) -> bool {
    cart.add_item(product_id, 1, variation_id, &BTreeMap::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, Product, Variant};
    use crate::selection::SubmissionItem;
    use crate::types::ProductKind;

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
                variants: vec![Variant {
                    id: VariationId(201),
                    price: 18.0,
                    attributes: BTreeMap::from([(
                        "attribute_size".to_string(),
                        "S".to_string(),
                    )]),
                }],
            },
        ])
    }

    fn simple_item(id: u64) -> SubmissionItem {
        SubmissionItem {
            product_id: ProductId(id),
            variations: BTreeMap::new(),
        }
    }

    fn shirt_item(size: &str) -> SubmissionItem {
        SubmissionItem {
            product_id: ProductId(2),
            variations: BTreeMap::from([("size".to_string(), size.to_string())]),
        }
    }

    #[test]
    fn test_add_all_resolves_variant_line() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        let outcome = add_all(&catalog, &mut cart, &vec![shirt_item("S")]);

        assert!(matches!(outcome, AddAllOutcome::Added { count: 1, .. }));
        assert_eq!(cart.lines()[0].variation_id, Some(VariationId(201)));
    }

    #[test]
    fn test_unknown_product_is_skipped_silently() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        let outcome = add_all(&catalog, &mut cart, &vec![simple_item(404), simple_item(1)]);

        assert!(matches!(outcome, AddAllOutcome::Added { count: 1, .. }));
    }

    #[test]
    fn test_variation_required_overrides_partial_success() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        // Simple product succeeds first, then the bare variable entry
        let outcome = add_all(
            &catalog,
            &mut cart,
            &vec![simple_item(1), simple_item(2)],
        );

        assert_eq!(outcome, AddAllOutcome::VariationRequired);
        // The simple product was still added to the platform cart; only
        // the reported outcome is a failure.
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_unresolved_variant_is_not_variation_required() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        let outcome = add_all(&catalog, &mut cart, &vec![shirt_item("XXL")]);

        assert_eq!(outcome, AddAllOutcome::NothingAdded);
    }

    #[test]
    fn test_empty_submission_is_generic_failure() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        assert_eq!(add_all(&catalog, &mut cart, &vec![]), AddAllOutcome::NothingAdded);
    }

    #[test]
    fn test_platform_rejection_is_not_counted() {
        let catalog = catalog();
        let mut cart = InMemoryCart::new();
        cart.reject(ProductId(1));
        let outcome = add_all(&catalog, &mut cart, &vec![simple_item(1)]);

        assert_eq!(outcome, AddAllOutcome::NothingAdded);
    }

    #[test]
    fn test_add_single_with_variant() {
        let mut cart = InMemoryCart::new();
        assert!(add_single(&mut cart, ProductId(2), Some(VariationId(201))));
        assert_eq!(cart.lines()[0].variation_id, Some(VariationId(201)));
    }
}
