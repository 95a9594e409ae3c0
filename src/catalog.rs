//! Storefront catalog model
//!
//! Products and variants are defined by the storefront catalog and are
//! read-only to this crate. The [`Catalog`] trait is the seam to the real
//! platform; [`InMemoryCatalog`] backs tests and the demo binary.

use crate::error::{FbtError, Result};
use crate::types::{ProductId, ProductKind, VariationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A purchasable configuration of a variable product.
///
/// `attributes` is keyed by normalized keys (`attribute_<slug>`), the same
/// shape the embedded client data block carries. Variant order within a
/// product is the catalog's definition order and is load-bearing: duplicate
/// attribute combinations resolve to the earlier variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariationId,
    pub price: f64,
    pub attributes: BTreeMap<String, String>,
}

/// One product as the catalog defines it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub kind: ProductKind,
    /// Base display price (pre-variation)
    pub price: f64,
    /// Variants in catalog definition order; empty for simple products
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Whether this product requires a variation choice before purchase
    pub fn is_variable(&self) -> bool {
        self.kind == ProductKind::Variable
    }

    /// Initial displayed price: the first variant's price for variable
    /// products, the base price otherwise.
    pub fn display_price(&self) -> f64 {
        if self.is_variable() {
            self.variants.first().map_or(self.price, |v| v.price)
        } else {
            self.price
        }
    }

    /// Attribute keys across all variants, in first-seen order
    pub fn attribute_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for variant in &self.variants {
            for key in variant.attributes.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    /// Distinct option values for one attribute key, in variant order
    pub fn attribute_options(&self, key: &str) -> Vec<String> {
        let mut options: Vec<String> = Vec::new();
        for variant in &self.variants {
            if let Some(value) = variant.attributes.get(key) {
                if !options.iter().any(|o| o == value) {
                    options.push(value.clone());
                }
            }
        }
        options
    }
}

/// Read-only product lookup, implemented by the storefront platform
pub trait Catalog {
    /// Look up a product by id; `None` when the catalog has no such product
    fn product(&self, id: ProductId) -> Option<&Product>;
}

/// Catalog held in memory, loadable from a JSON product list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON file containing a product array
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&contents)
            .map_err(|e| FbtError::catalog(format!("{}: {}", path.display(), e)))?;
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl Catalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Product {
        Product {
            id: ProductId(10),
            name: "Shirt".to_string(),
            kind: ProductKind::Variable,
            price: 20.0,
            variants: vec![
                Variant {
                    id: VariationId(101),
                    price: 18.0,
                    attributes: BTreeMap::from([
                        ("attribute_size".to_string(), "S".to_string()),
                        ("attribute_color".to_string(), "Red".to_string()),
                    ]),
                },
                Variant {
                    id: VariationId(102),
                    price: 22.0,
                    attributes: BTreeMap::from([
                        ("attribute_size".to_string(), "M".to_string()),
                        ("attribute_color".to_string(), "Blue".to_string()),
                    ]),
                },
            ],
        }
    }

    #[test]
    fn test_display_price_variable_uses_first_variant() {
        assert_eq!(shirt().display_price(), 18.0);
    }

    #[test]
    fn test_display_price_simple_uses_base() {
        let p = Product {
            id: ProductId(1),
            name: "Mug".to_string(),
            kind: ProductKind::Simple,
            price: 7.5,
            variants: vec![],
        };
        assert_eq!(p.display_price(), 7.5);
    }

    #[test]
    fn test_attribute_keys_first_seen_order() {
        let keys = shirt().attribute_keys();
        // BTreeMap iteration is alphabetical within a variant
        assert_eq!(keys, vec!["attribute_color", "attribute_size"]);
    }

    #[test]
    fn test_attribute_options_deduplicated() {
        let p = shirt();
        assert_eq!(p.attribute_options("attribute_size"), vec!["S", "M"]);
        assert_eq!(p.attribute_options("attribute_color"), vec!["Red", "Blue"]);
        assert!(p.attribute_options("attribute_missing").is_empty());
    }

    #[test]
    fn test_in_memory_catalog_lookup() {
        let catalog = InMemoryCatalog::new(vec![shirt()]);
        assert!(catalog.product(ProductId(10)).is_some());
        assert!(catalog.product(ProductId(99)).is_none());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Mug", "price": 5.0}},
               {{"id": 2, "name": "Cap", "kind": "simple", "price": 9.0}}]"#
        )
        .unwrap();

        let catalog = InMemoryCatalog::load_from_file(file.path()).unwrap();
        assert_eq!(catalog.products().len(), 2);
        assert_eq!(catalog.product(ProductId(1)).unwrap().name, "Mug");
    }

    #[test]
    fn test_load_from_file_rejects_bad_json() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not a catalog").unwrap();

        let err = InMemoryCatalog::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, FbtError::Catalog(_)));
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{
            "id": 5,
            "name": "Cap",
            "kind": "simple",
            "price": 9.99
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId(5));
        assert_eq!(p.kind, ProductKind::Simple);
        assert!(p.variants.is_empty());
    }
}
