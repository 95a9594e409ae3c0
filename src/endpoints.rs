//! Inbound JSON endpoints
//!
//! The request/response boundary the storefront's transport layer calls
//! into. Loosely-typed payloads are validated into typed structures here,
//! before anything reaches the resolver or the cart — malformed shapes are
//! rejected at the edge instead of propagating inward.
//!
//! Responses mirror the platform's `{ "success": bool, "data": ... }`
//! envelope, so failures are data, not transport errors; every failure
//! leaves the shopper's page re-attemptable.

use crate::cart::{add_all, add_single, AddAllOutcome, Cart};
use crate::catalog::Catalog;
use crate::error::{FbtError, Result};
use crate::selection::BundleSubmission;
use crate::types::{ProductId, VariationId};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

/// Single-product add request
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variation_id: Option<VariationId>,
}

/// Add-all request: `product_data` carries the submission list as a JSON
/// string, matching the original wire shape
#[derive(Debug, Deserialize)]
struct AddAllRequest {
    product_data: String,
}

fn success(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

fn failure(data: Value) -> Value {
    json!({ "success": false, "data": data })
}

/// Parse and validate an add-to-cart payload
pub fn parse_add_to_cart(payload: &str) -> Result<AddToCartRequest> {
    serde_json::from_str(payload)
        .map_err(|e| FbtError::malformed(format!("add-to-cart payload: {}", e)))
}

/// Parse and validate an add-all payload into a typed submission
pub fn parse_add_all(payload: &str) -> Result<BundleSubmission> {
    let request: AddAllRequest = serde_json::from_str(payload)
        .map_err(|_| FbtError::malformed("no product data received"))?;
    parse_submission(&request.product_data)
}

/// Validate the submission list itself (the `product_data` JSON string)
fn parse_submission(product_data: &str) -> Result<BundleSubmission> {
    let submission: BundleSubmission = serde_json::from_str(product_data)
        .map_err(|_| FbtError::malformed("invalid product data"))?;
    if submission.is_empty() {
        return Err(FbtError::malformed("invalid product data"));
    }
    Ok(submission)
}

/// Handle the single-product endpoint.
///
/// `{product_id, variation_id?}` in, `{success, data: {message}}` out.
pub fn handle_add_to_cart(cart: &mut dyn Cart, payload: &str) -> Value {
    let request = match parse_add_to_cart(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejecting add-to-cart request");
            return failure(json!({ "message": "Invalid request" }));
        }
    };

    if add_single(cart, request.product_id, request.variation_id) {
        success(json!({ "message": "Product added to cart" }))
    } else {
        failure(json!({ "message": "Could not add product to cart" }))
    }
}

/// Handle the add-all endpoint.
///
/// A missing variation selection anywhere in the batch produces the
/// distinguished `variation_required` failure, overriding any entries that
/// did make it into the cart.
pub fn handle_add_all(catalog: &dyn Catalog, cart: &mut dyn Cart, payload: &str) -> Value {
    let request: AddAllRequest = match serde_json::from_str(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "add-all payload without product data");
            return failure(json!({ "message": "No product data received" }));
        }
    };
    let submission = match parse_submission(&request.product_data) {
        Ok(submission) => submission,
        Err(e) => {
            warn!(error = %e, "rejecting add-all request");
            return failure(json!({ "message": "Invalid product data" }));
        }
    };

    match add_all(catalog, cart, &submission) {
        AddAllOutcome::VariationRequired => failure(json!({
            "message": "Please select variations for all products before adding to cart",
            "type": "variation_required",
        })),
        AddAllOutcome::Added { count, cart_url } => success(json!({
            "message": added_message(count),
            "cart_url": cart_url,
        })),
        AddAllOutcome::NothingAdded => {
            failure(json!({ "message": "Failed to add products to cart" }))
        }
    }
}

/// Current cart item count, for client-side badge refreshes
pub fn handle_cart_count(cart: &dyn Cart) -> Value {
    success(json!({ "cart_count": cart.item_count() }))
}

fn added_message(count: u32) -> String {
    if count == 1 {
        "1 product added to cart successfully.".to_string()
    } else {
        format!("{} products added to cart successfully.", count)
    }
}
