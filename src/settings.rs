//! Widget configuration
//!
//! Models the platform's key-value option store as an injected,
//! typed settings object. The presenter is the only consumer; the
//! selection/resolver/composer core stays free of ambient settings reads
//! apart from the checked-by-default seed.

use crate::types::{DisplayMode, ProductId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use tracing::warn;

/// Enumerated option-store keys with their storefront names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum SettingKey {
    #[strum(serialize = "fbt_enable")]
    Enable,
    #[strum(serialize = "fbt_title")]
    Title,
    #[strum(serialize = "fbt_checked_default")]
    CheckedDefault,
    #[strum(serialize = "fbt_show_variation_prices")]
    ShowVariationPrices,
    #[strum(serialize = "fbt_button_color")]
    ButtonColor,
    #[strum(serialize = "fbt_add_all_color")]
    AddAllColor,
    #[strum(serialize = "fbt_button_text_color")]
    ButtonTextColor,
    #[strum(serialize = "fbt_add_all_text_color")]
    AddAllTextColor,
    #[strum(serialize = "fbt_display_control")]
    DisplayControl,
    #[strum(serialize = "fbt_default_products")]
    DefaultProducts,
}

/// Complete widget configuration with typed defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Master enable flag for the whole widget
    pub enabled: bool,
    /// Heading text above the bundle
    pub title: String,
    /// Seed bundle checkboxes as checked (never marks variations explicit)
    pub checked_by_default: bool,
    /// Append per-option prices to size-attribute dropdown entries
    pub show_variation_prices: bool,
    /// "Select Variation" button background
    pub button_color: String,
    /// "Add All to Cart" button background
    pub add_all_color: String,
    /// "Select Variation" button text color
    pub button_text_color: String,
    /// "Add All to Cart" button text color
    pub add_all_text_color: String,
    /// Where the section renders
    pub display_mode: DisplayMode,
    /// Fallback comma-separated product ids suggested when a product has
    /// no curated companions
    pub default_products: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            title: "Frequently Bought Together".to_string(),
            checked_by_default: false,
            show_variation_prices: false,
            button_color: "#96588a".to_string(),
            add_all_color: "#96588a".to_string(),
            button_text_color: "#ffffff".to_string(),
            add_all_text_color: "#ffffff".to_string(),
            display_mode: DisplayMode::Default,
            default_products: String::new(),
        }
    }
}

impl WidgetSettings {
    /// Build settings from raw option-store pairs.
    ///
    /// Unknown keys are logged and skipped; unparsable values fall back to
    /// the typed default for that key.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            let Ok(key) = SettingKey::from_str(key) else {
                warn!(key, "ignoring unknown setting key");
                continue;
            };
            settings.apply(key, value);
        }
        settings
    }

    fn apply(&mut self, key: SettingKey, value: &str) {
        match key {
            SettingKey::Enable => self.enabled = parse_flag(value),
            SettingKey::Title => {
                if !value.trim().is_empty() {
                    self.title = value.trim().to_string();
                }
            }
            SettingKey::CheckedDefault => self.checked_by_default = parse_flag(value),
            SettingKey::ShowVariationPrices => self.show_variation_prices = parse_flag(value),
            SettingKey::ButtonColor => apply_color(&mut self.button_color, value),
            SettingKey::AddAllColor => apply_color(&mut self.add_all_color, value),
            SettingKey::ButtonTextColor => apply_color(&mut self.button_text_color, value),
            SettingKey::AddAllTextColor => apply_color(&mut self.add_all_text_color, value),
            SettingKey::DisplayControl => match DisplayMode::from_str(value.trim()) {
                Ok(mode) => self.display_mode = mode,
                Err(_) => warn!(value, "invalid display mode, keeping default"),
            },
            SettingKey::DefaultProducts => self.default_products = value.trim().to_string(),
        }
    }

    /// Display-mode gate: default mode hides inside shortcode contexts,
    /// shortcode mode renders only inside them.
    pub fn should_display(&self, in_shortcode_context: bool) -> bool {
        match self.display_mode {
            DisplayMode::Default => !in_shortcode_context,
            DisplayMode::Shortcode => in_shortcode_context,
        }
    }

    /// Parse the fallback default-product-id list
    pub fn default_product_ids(&self) -> Vec<ProductId> {
        parse_product_ids(&self.default_products)
    }
}

/// Truthiness of stored flag values ("1", "true", "yes" are on)
fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn apply_color(slot: &mut String, value: &str) {
    if is_hex_color(value.trim()) {
        *slot = value.trim().to_ascii_lowercase();
    } else {
        warn!(value, "invalid hex color, keeping default");
    }
}

/// `#rgb` or `#rrggbb`
fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a comma-separated product id list.
///
/// Empty entries and non-numeric junk are filtered out.
pub fn parse_product_ids(input: &str) -> Vec<ProductId> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u64>().ok().map(ProductId))
        .collect()
}

/// Contrasting text color for a hex background, by YIQ luma.
///
/// Anything that is not `#rgb`/`#rrggbb` counts as a dark background.
pub fn contrast_color(hexcolor: &str) -> &'static str {
    let trimmed = hexcolor.trim();
    if !is_hex_color(trimmed) {
        return "#ffffff";
    }
    let digits = &trimmed[1..];
    let expand = |s: &str| u32::from_str_radix(s, 16).unwrap_or(0);
    let (r, g, b) = if digits.len() == 3 {
        let mut it = digits.chars();
        let dup = |c: Option<char>| {
            let c = c.unwrap_or('0');
            expand(&format!("{}{}", c, c))
        };
        (dup(it.next()), dup(it.next()), dup(it.next()))
    } else {
        (
            expand(&digits[0..2]),
            expand(&digits[2..4]),
            expand(&digits[4..6]),
        )
    };
    let yiq = (r * 299 + g * 587 + b * 114) / 1000;
    if yiq >= 128 {
        "#000000"
    } else {
        "#ffffff"
    }
}
