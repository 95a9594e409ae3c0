//! Selection State Tracker
//!
//! Keeps the shopper-facing bundle state consistent with selection intent:
//! which items are checked, which attribute values are chosen, whether a
//! choice was made *explicitly* (as opposed to pre-filled by default
//! rendering), and the derived running total and add-all enablement.
//!
//! State is an owned [`SelectionState`] object rather than an ambient map
//! keyed by product id, so the recompute logic is testable without any UI
//! attached. Every mutation arrives as a [`SelectionEvent`] and triggers a
//! full synchronous recompute — there is no concurrent mutation source and
//! no partial recomputation.

use crate::types::{attribute_key, format_price, ProductId, VariationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Order total at or above which the heading switches to the
/// free-shipping wording. Cosmetic, not a pricing rule.
pub const FREE_SHIPPING_THRESHOLD: f64 = 50.0;

/// One row of the embedded variation data block.
///
/// This is the sole data contract between the Bundle Presenter and this
/// tracker: a list of these objects per variable product, attributes keyed
/// by normalized `attribute_<slug>` keys. The shape must stay stable for
/// price lookups to function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantData {
    pub variation_id: VariationId,
    pub attributes: BTreeMap<String, String>,
    pub price: f64,
}

/// One attribute dropdown: raw attribute name plus the currently chosen
/// value ("" while the placeholder is showing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChoice {
    pub name: String,
    pub value: String,
}

/// Transient per-bundle-item state, created when the bundle renders and
/// discarded on navigation; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEntry {
    pub product_id: ProductId,
    /// Bundle checkbox state
    pub checked: bool,
    /// Fixed unit price for simple items (the checkbox's data price);
    /// zero for variable items, whose price comes from the data block
    pub unit_price: f64,
    /// Attribute dropdowns in render order; empty for simple items
    pub choices: Vec<AttributeChoice>,
    /// Variation data block rows; empty for simple items
    pub variants: Vec<VariantData>,
    /// Whether the shopper actively picked a variation, as opposed to a
    /// value being present from default rendering
    pub explicitly_chosen: bool,
    /// Variant-picker modal visibility; never affects selection
    pub modal_open: bool,
    /// Product name as first rendered, cached so repeated title updates
    /// never compound
    pristine_name: String,
}

impl SelectionEntry {
    /// Entry for a simple product with a fixed unit price
    pub fn simple(product_id: ProductId, name: impl Into<String>, price: f64, checked: bool) -> Self {
        Self {
            product_id,
            checked,
            unit_price: price,
            choices: Vec::new(),
            variants: Vec::new(),
            explicitly_chosen: false,
            modal_open: false,
            pristine_name: name.into(),
        }
    }

    /// Entry for a variable product.
    ///
    /// `choices` may carry pre-selected default values; those never count
    /// as explicitly chosen — the flag starts false regardless.
    pub fn variable(
        product_id: ProductId,
        name: impl Into<String>,
        choices: Vec<AttributeChoice>,
        variants: Vec<VariantData>,
        checked: bool,
    ) -> Self {
        Self {
            product_id,
            checked,
            unit_price: 0.0,
            choices,
            variants,
            explicitly_chosen: false,
            modal_open: false,
            pristine_name: name.into(),
        }
    }

    /// Variable items are the ones that rendered attribute dropdowns
    pub fn is_variable(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Every dropdown holds a non-empty value
    pub fn attributes_complete(&self) -> bool {
        self.choices.iter().all(|c| !c.value.trim().is_empty())
    }

    /// Selected attributes under normalized keys, for data-block matching
    fn normalized_selection(&self) -> BTreeMap<String, String> {
        self.choices
            .iter()
            .map(|c| (attribute_key(&c.name), c.value.clone()))
            .collect()
    }

    /// Price of the data-block row matching the current selection by exact
    /// equality on every key/value pair; `None` when nothing matches
    pub fn matched_variant_price(&self) -> Option<f64> {
        let selected = self.normalized_selection();
        self.variants
            .iter()
            .find(|v| {
                selected
                    .iter()
                    .all(|(key, value)| v.attributes.get(key) == Some(value))
            })
            .map(|v| v.price)
    }

    /// Display title: pristine name plus the chosen values, recomputed
    /// from the cached pristine name on every call
    pub fn display_title(&self) -> String {
        let picked: Vec<&str> = self
            .choices
            .iter()
            .map(|c| c.value.trim())
            .filter(|v| !v.is_empty())
            .collect();
        if picked.is_empty() {
            self.pristine_name.clone()
        } else {
            format!("{} - {}", self.pristine_name, picked.join(", "))
        }
    }
}

/// Shopper-driven state mutations
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    CheckboxToggled {
        product_id: ProductId,
        checked: bool,
    },
    AttributeChanged {
        product_id: ProductId,
        attribute: String,
        value: String,
    },
    /// Opening the variant picker: visibility only
    ModalOpened { product_id: ProductId },
    /// Any dismissal (close control, overlay click): visibility only
    ModalClosed { product_id: ProductId },
}

/// Derived bundle totals and button state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleComputation {
    /// Running total across checked, priceable items
    pub total: f64,
    /// "Add All" is enabled only when at least one item is checked, every
    /// checked variable item is fully attributed, and every checked
    /// variable item was explicitly chosen
    pub add_all_enabled: bool,
    /// Heading switches wording at the free-shipping threshold
    pub free_shipping: bool,
}

impl BundleComputation {
    /// Two-decimal currency rendering of the total
    pub fn formatted_total(&self) -> String {
        format_price(self.total)
    }

    /// Heading text for the given base title
    pub fn heading(&self, base_title: &str) -> String {
        if self.free_shipping {
            format!("{} (With Free Shipping)", base_title)
        } else {
            base_title.to_string()
        }
    }
}

/// One submission entry: product id plus raw attribute-name selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub variations: BTreeMap<String, String>,
}

/// Ordered submission built from checked entries at submit time,
/// consumed once server-side
pub type BundleSubmission = Vec<SubmissionItem>;

/// Per-session selection state for one rendered bundle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    entries: Vec<SelectionEntry>,
}

impl SelectionState {
    pub fn new(entries: Vec<SelectionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn entry(&self, product_id: ProductId) -> Option<&SelectionEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    fn entry_mut(&mut self, product_id: ProductId) -> Option<&mut SelectionEntry> {
        self.entries.iter_mut().find(|e| e.product_id == product_id)
    }

    /// Apply one event and run the full recompute
    pub fn apply(&mut self, event: SelectionEvent) -> BundleComputation {
        match event {
            SelectionEvent::CheckboxToggled { product_id, checked } => {
                if let Some(entry) = self.entry_mut(product_id) {
                    entry.checked = checked;
                }
            }
            SelectionEvent::AttributeChanged {
                product_id,
                attribute,
                value,
            } => {
                if let Some(entry) = self.entry_mut(product_id) {
                    let explicit = !value.trim().is_empty();
                    if let Some(choice) =
                        entry.choices.iter_mut().find(|c| c.name == attribute)
                    {
                        // A non-empty pick marks the whole product explicit,
                        // clearing back to the placeholder un-marks it
                        choice.value = value;
                        entry.explicitly_chosen = explicit;
                    } else {
                        debug!(%product_id, attribute, "attribute not rendered for product");
                    }
                }
            }
            SelectionEvent::ModalOpened { product_id } => {
                if let Some(entry) = self.entry_mut(product_id) {
                    entry.modal_open = true;
                }
            }
            SelectionEvent::ModalClosed { product_id } => {
                if let Some(entry) = self.entry_mut(product_id) {
                    entry.modal_open = false;
                }
            }
        }
        self.compute()
    }

    /// The full recompute run after every relevant mutation.
    ///
    /// Simple checked items contribute their fixed price. A checked
    /// variable item with an incomplete or unconfirmed selection stops
    /// accumulation at that point and keeps the action disabled; a
    /// complete, explicit selection contributes its matched data-block
    /// price, or nothing when no row matches (which is not invalid).
    pub fn compute(&self) -> BundleComputation {
        let mut total = 0.0;
        let mut any_checked = false;
        let mut all_valid = true;
        let mut all_explicit = true;

        for entry in self.entries.iter().filter(|e| e.checked) {
            any_checked = true;

            if !entry.is_variable() {
                total += entry.unit_price;
                continue;
            }

            if !entry.attributes_complete() {
                all_valid = false;
                break;
            }

            if !entry.explicitly_chosen {
                all_explicit = false;
                break;
            }

            if let Some(price) = entry.matched_variant_price() {
                if price > 0.0 {
                    total += price;
                }
            }
        }

        BundleComputation {
            total,
            add_all_enabled: any_checked && all_valid && all_explicit,
            free_shipping: total >= FREE_SHIPPING_THRESHOLD,
        }
    }

    /// Display title for one item, `None` for unknown products
    pub fn display_title(&self, product_id: ProductId) -> Option<String> {
        self.entry(product_id).map(SelectionEntry::display_title)
    }

    /// Serialize the checked entries, in render order, into the
    /// submission payload. Attribute values are sent verbatim under their
    /// raw names; untouched variable items submit whatever their dropdowns
    /// hold.
    pub fn submission(&self) -> BundleSubmission {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| SubmissionItem {
                product_id: e.product_id,
                variations: e
                    .choices
                    .iter()
                    .map(|c| (c.name.clone(), c.value.clone()))
                    .collect(),
            })
            .collect()
    }
}
