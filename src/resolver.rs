//! Variation Resolver
//!
//! Translates a shopper's attribute selections into a concrete purchasable
//! variant id.
//!
//! # Design
//!
//! - **Pure logic**: No I/O, no side effects — only resolves ids
//! - **Normalized keys**: selection names are slugified and prefixed before
//!   lookup so callers may pass raw dropdown names
//! - **First match wins**: variants are scanned in catalog definition
//!   order; duplicate attribute combinations resolve to the earlier
//!   variant. This is a documented catalog-data-quality assumption, not a
//!   uniqueness guarantee — do not "fix" it by picking a better match.
//!
//! # Resolution Rules
//!
//! | Input                              | Result |
//! |------------------------------------|--------|
//! | Simple product                     | `None` |
//! | Variable product with no variants  | `None` |
//! | No variant matches every selection | `None` |
//! | One or more variants match         | first matching variant's id |

use crate::catalog::{Catalog, Product, Variant};
use crate::types::{attribute_key, ProductId, VariationId};
use std::collections::BTreeMap;
use tracing::debug;

/// Find the first variant of `product` matching every selection.
///
/// A variant matches when, for each `(name, value)` selection, it carries
/// the normalized key `attribute_<slug(name)>` with a value equal to
/// `value` ignoring ASCII case. `None` is a "skip this item" signal, never
/// an error.
pub fn find_matching_variation(
    product: &Product,
    selections: &BTreeMap<String, String>,
) -> Option<VariationId> {
    if !product.is_variable() || product.variants.is_empty() {
        return None;
    }

    for variant in &product.variants {
        if variant_matches(variant, selections) {
            debug!(
                product_id = %product.id,
                variation_id = %variant.id,
                "resolved variation"
            );
            return Some(variant.id);
        }
    }

    debug!(product_id = %product.id, "no variation matched selections");
    None
}

/// Catalog-level convenience: resolve by product id
pub fn resolve(
    catalog: &dyn Catalog,
    product_id: ProductId,
    selections: &BTreeMap<String, String>,
) -> Option<VariationId> {
    catalog
        .product(product_id)
        .and_then(|product| find_matching_variation(product, selections))
}

fn variant_matches(variant: &Variant, selections: &BTreeMap<String, String>) -> bool {
    selections.iter().all(|(name, value)| {
        variant
            .attributes
            .get(&attribute_key(name))
            .is_some_and(|have| have.eq_ignore_ascii_case(value))
    })
}
