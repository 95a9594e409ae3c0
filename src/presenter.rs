//! Bundle Presenter
//!
//! Thin, derived layer: reads the curated companion list for a main
//! product and produces the structured bundle view the client renders,
//! including per-item pricing, variation pickers, and the embedded
//! variation data block the Selection State Tracker matches prices
//! against. Markup emission itself belongs to the storefront theme.

use crate::catalog::Catalog;
use crate::companions::CompanionList;
use crate::error::Result;
use crate::selection::{AttributeChoice, SelectionEntry, SelectionState, VariantData};
use crate::settings::WidgetSettings;
use crate::types::{attribute_label, format_price, ProductId, ProductKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One dropdown option, with an optional price-suffixed label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub value: String,
    pub label: String,
}

/// One attribute dropdown of a variation picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeField {
    /// Bare attribute name, the key the client submits selections under
    pub name: String,
    /// Human-readable label
    pub label: String,
    pub options: Vec<AttributeOption>,
}

/// Variation picker for one variable bundle item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationPicker {
    /// Modal element id, unique within the rendered bundle
    pub modal_id: String,
    pub fields: Vec<AttributeField>,
    /// The embedded data block: the sole contract with the tracker
    pub data_block: Vec<VariantData>,
}

impl VariationPicker {
    /// The data block as the embedded JSON the client reads
    pub fn data_block_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data_block)?)
    }
}

/// Button styling from settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub background: String,
    pub text_color: String,
}

/// One rendered bundle item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleItem {
    pub product_id: ProductId,
    pub name: String,
    pub kind: ProductKind,
    /// Initial displayed price (first variant's for variable products)
    pub price_display: String,
    /// The checkbox's fixed data price: zero for variable items
    pub default_price: f64,
    /// Checked-by-default seed; never marks variations explicit
    pub checked: bool,
    pub picker: Option<VariationPicker>,
}

/// The full structured bundle view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleView {
    pub heading: String,
    pub items: Vec<BundleItem>,
    pub select_button: ButtonStyle,
    pub add_all_button: ButtonStyle,
    /// Initial total rendering before any selection
    pub initial_total: String,
}

impl BundleView {
    /// Seed the client-side tracker from this view.
    ///
    /// Variable items start with their first option pre-selected, exactly
    /// as rendered, and `explicitly_chosen` false for all of them.
    pub fn selection_state(&self) -> SelectionState {
        let entries = self
            .items
            .iter()
            .map(|item| match &item.picker {
                None => SelectionEntry::simple(
                    item.product_id,
                    item.name.clone(),
                    item.default_price,
                    item.checked,
                ),
                Some(picker) => SelectionEntry::variable(
                    item.product_id,
                    item.name.clone(),
                    picker
                        .fields
                        .iter()
                        .map(|field| AttributeChoice {
                            name: field.name.clone(),
                            value: field
                                .options
                                .first()
                                .map(|o| o.value.clone())
                                .unwrap_or_default(),
                        })
                        .collect(),
                    picker.data_block.clone(),
                    item.checked,
                ),
            })
            .collect();
        SelectionState::new(entries)
    }
}

/// Build the bundle view for a main product.
///
/// Returns `None` when the feature is disabled or nothing would render.
/// The render set is the main product followed by its companions,
/// deduplicated; an empty companion list falls back to the configured
/// default-product suggestion ids.
pub fn present(
    catalog: &dyn Catalog,
    settings: &WidgetSettings,
    main_product: ProductId,
    companions: &CompanionList,
) -> Option<BundleView> {
    if !settings.enabled {
        return None;
    }

    let companions = if companions.is_empty() {
        CompanionList::store(&settings.default_product_ids())
    } else {
        companions.clone()
    };
    if companions.is_empty() {
        return None;
    }

    let mut items = Vec::new();
    for (index, id) in companions.render_set(main_product).into_iter().enumerate() {
        let Some(product) = catalog.product(id) else {
            debug!(product_id = %id, "companion not in catalog, dropping");
            continue;
        };

        let picker = if product.is_variable() {
            Some(build_picker(product, settings, index))
        } else {
            None
        };

        items.push(BundleItem {
            product_id: product.id,
            name: product.name.clone(),
            kind: product.kind,
            price_display: format_price(product.display_price()),
            default_price: if product.is_variable() { 0.0 } else { product.price },
            checked: settings.checked_by_default,
            picker,
        });
    }

    if items.is_empty() {
        return None;
    }

    Some(BundleView {
        heading: settings.title.clone(),
        items,
        select_button: ButtonStyle {
            background: settings.button_color.clone(),
            text_color: settings.button_text_color.clone(),
        },
        add_all_button: ButtonStyle {
            background: settings.add_all_color.clone(),
            text_color: settings.add_all_text_color.clone(),
        },
        initial_total: format_price(0.0),
    })
}

fn build_picker(
    product: &crate::catalog::Product,
    settings: &WidgetSettings,
    index: usize,
) -> VariationPicker {
    let data_block: Vec<VariantData> = product
        .variants
        .iter()
        .map(|v| VariantData {
            variation_id: v.id,
            attributes: v.attributes.clone(),
            price: v.price,
        })
        .collect();

    let fields = product
        .attribute_keys()
        .into_iter()
        .map(|key| {
            let name = key.strip_prefix("attribute_").unwrap_or(&key).to_string();
            let options = product
                .attribute_options(&key)
                .into_iter()
                .map(|value| AttributeOption {
                    label: option_label(product, settings, &key, &value),
                    value,
                })
                .collect();
            AttributeField {
                label: attribute_label(&key),
                name,
                options,
            }
        })
        .collect();

    VariationPicker {
        modal_id: format!("fbt-modal-{}", index),
        fields,
        data_block,
    }
}

/// Option label, with a price suffix on size attributes when the
/// show-variation-prices setting is on
fn option_label(
    product: &crate::catalog::Product,
    settings: &WidgetSettings,
    key: &str,
    value: &str,
) -> String {
    if settings.show_variation_prices && key.contains("size") {
        let price = product
            .variants
            .iter()
            .find(|v| v.attributes.get(key).map(String::as_str) == Some(value))
            .map(|v| v.price)
            .unwrap_or(0.0);
        if price > 0.0 {
            return format!("{} - {}", value, format_price(price));
        }
    }
    value.to_string()
}
