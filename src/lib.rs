//! Frequently-bought-together bundle engine
//!
//! Renders a product-bundle widget, tracks the shopper's variation
//! selections, and composes the resulting cart mutation:
//!
//! - [`selection`] — client-side Selection State Tracker: explicit-choice
//!   tracking, running totals, add-all enablement
//! - [`resolver`] — server-side variation resolution (first match wins)
//! - [`cart`] — Cart Composer with its all-or-nothing variation policy
//! - [`presenter`] — bundle view derivation and the embedded variation
//!   data block
//! - [`endpoints`] — JSON request/response boundary
//!
//! Catalog and cart are owned by the storefront platform and reached
//! through the [`catalog::Catalog`] and [`cart::Cart`] traits.

pub mod cart;
pub mod catalog;
pub mod companions;
pub mod endpoints;
pub mod error;
pub mod presenter;
pub mod resolver;
pub mod selection;
pub mod settings;
pub mod types;

// Re-export main types for convenience
pub use cart::{add_all, add_single, AddAllOutcome, Cart, CartLine, InMemoryCart};
pub use catalog::{Catalog, InMemoryCatalog, Product, Variant};
pub use companions::{CompanionList, MAX_COMPANIONS};
pub use endpoints::{handle_add_all, handle_add_to_cart, handle_cart_count, AddToCartRequest};
pub use error::{FbtError, Result};
pub use presenter::{present, BundleItem, BundleView, VariationPicker};
pub use resolver::{find_matching_variation, resolve};
pub use selection::{
    AttributeChoice, BundleComputation, BundleSubmission, SelectionEntry, SelectionEvent,
    SelectionState, SubmissionItem, VariantData, FREE_SHIPPING_THRESHOLD,
};
pub use settings::{contrast_color, parse_product_ids, SettingKey, WidgetSettings};
pub use types::{
    attribute_key, attribute_label, format_price, slugify, DisplayMode, ProductId, ProductKind,
    VariationId,
};
