//! Curated companion-product lists
//!
//! Each main product carries an admin-curated list of up to two companion
//! product ids, persisted as a comma-separated metadata field. The main
//! product itself is never stored; it is synthesized at render time as the
//! first element of the render set.

use crate::settings::parse_product_ids;
use crate::types::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum number of companions an admin may attach to a product
pub const MAX_COMPANIONS: usize = 2;

/// Ordered companion ids for one main product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionList {
    ids: Vec<ProductId>,
}

impl CompanionList {
    /// Accept an admin-submitted candidate list: duplicates collapse,
    /// anything past the first two entries is dropped.
    pub fn store(candidates: &[ProductId]) -> Self {
        let mut ids: Vec<ProductId> = Vec::with_capacity(MAX_COMPANIONS);
        for &id in candidates {
            if ids.contains(&id) {
                continue;
            }
            ids.push(id);
            if ids.len() == MAX_COMPANIONS {
                break;
            }
        }
        Self { ids }
    }

    /// Parse the persisted comma-separated field
    pub fn parse(field: &str) -> Self {
        Self::store(&parse_product_ids(field))
    }

    /// Serialize back to the persisted comma-separated shape
    pub fn to_field(&self) -> String {
        self.ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The rendered bundle set: main product first, then companions,
    /// deduplicated. A stored main id is excluded here even if persistence
    /// let one slip in.
    pub fn render_set(&self, main: ProductId) -> Vec<ProductId> {
        let mut set = vec![main];
        for &id in &self.ids {
            if !set.contains(&id) {
                set.push(id);
            }
        }
        set
    }
}
