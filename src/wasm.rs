//! WASM bindings for the IsoVis engine
//!
//! Lets the browser front end compute comparison metrics in-process
//! instead of round-tripping through the HTTP service.

use wasm_bindgen::prelude::*;

use crate::api;

// Use wee_alloc for smaller WASM binary
#[cfg(feature = "wasm")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Comparison summary and bound envelope.
///
/// Takes a comparison request as JSON and returns
/// `{ success, error?, results? }` as JSON.
#[wasm_bindgen]
pub fn compare(request_json: &str) -> String {
    api::compare_json(request_json)
}

/// Summary of a single `{ type, results }` analysis result set
#[wasm_bindgen]
pub fn summarize_results(request_json: &str) -> String {
    api::summarize_json(request_json)
}

/// Validate a structural model definition
#[wasm_bindgen]
pub fn validate_model(model_json: &str) -> String {
    api::check_model_json(model_json)
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
