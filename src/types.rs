//! Type-safe core types for the bundle engine
//!
//! Replaces the stringly-typed identifiers and attribute keys of the
//! storefront wire format with proper Rust types that provide compile-time
//! validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

/// Identifier of a catalog product
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a purchasable variant of a variable product
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariationId(pub u64);

impl fmt::Display for VariationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product type in the storefront catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    #[default]
    #[strum(serialize = "simple")]
    Simple,
    #[strum(serialize = "variable")]
    Variable,
}

/// Where the bundle section is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Default position on the product page
    #[default]
    #[strum(serialize = "default")]
    Default,
    /// Rendered only where the shortcode is placed
    #[strum(serialize = "shortcode")]
    Shortcode,
}

/// Lower-case slug of an attribute name: underscores survive, any other
/// non-alphanumeric run collapses to a single dash, leading/trailing dashes
/// are stripped.
///
/// Mirrors the storefront's title sanitization so that keys produced here
/// line up with the keys the catalog stores on its variants.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true; // suppress leading dash
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Normalized variant-attribute key: `attribute_<slug>`.
///
/// Variant attribute maps are keyed this way both in the embedded client
/// data block and in the catalog, so every lookup goes through here.
pub fn attribute_key(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("attribute_") {
        format!("attribute_{}", slugify(rest))
    } else {
        format!("attribute_{}", slugify(name))
    }
}

/// Human-readable label for an attribute slug ("pa_shirt-size" -> "Shirt Size")
pub fn attribute_label(name: &str) -> String {
    let bare = name.strip_prefix("attribute_").unwrap_or(name);
    let bare = bare.strip_prefix("pa_").unwrap_or(bare);
    let mut label = String::with_capacity(bare.len());
    let mut start_of_word = true;
    for c in bare.chars() {
        if c == '-' || c == '_' {
            label.push(' ');
            start_of_word = true;
        } else if start_of_word {
            label.extend(c.to_uppercase());
            start_of_word = false;
        } else {
            label.push(c);
        }
    }
    label
}

/// Currency symbol used for displayed totals
pub const CURRENCY_SYMBOL: &str = "€";

/// Format a price for display with two decimals, e.g. `€12.50`
pub fn format_price(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}
