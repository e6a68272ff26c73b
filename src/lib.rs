use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

mod bit_set;
mod error;

pub use bit_set::{BitSet, Iter, MAX_IDENTIFIER, WIDTH, decode, encode, has_bit, toggle_bit};
pub use error::{Error, Result};

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

// Masks and identifiers arrive as `JsValue` rather than `u32`/`i32`: wasm-bindgen would
// coerce a JS number modulo 2^32 and drop its fraction before any range check ran.

#[wasm_bindgen(js_name = encode)]
#[allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]
pub fn encode_js(ids: JsValue) -> Result<u32, JsValue> {
    encode_ids(ids).map_err(|e| JsValue::from_str(&format!("Encoding failed: {e}")))
}

#[wasm_bindgen(js_name = decode)]
#[allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]
pub fn decode_js(mask: JsValue) -> Result<Vec<u32>, JsValue> {
    mask_from_js(mask)
        .map(decode)
        .map_err(|e| JsValue::from_str(&format!("Decoding failed: {e}")))
}

#[wasm_bindgen(js_name = hasBit)]
#[allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]
pub fn has_bit_js(mask: JsValue, id: JsValue) -> Result<bool, JsValue> {
    let query = || -> anyhow::Result<bool> {
        Ok(has_bit(mask_from_js(mask)?, identifier_from_js(id)?)?)
    };
    query().map_err(|e| JsValue::from_str(&format!("Bit lookup failed: {e}")))
}

#[wasm_bindgen(js_name = toggleBit)]
#[allow(clippy::missing_errors_doc, clippy::needless_pass_by_value)]
pub fn toggle_bit_js(mask: JsValue, id: JsValue) -> Result<u32, JsValue> {
    let toggle = || -> anyhow::Result<u32> {
        Ok(toggle_bit(mask_from_js(mask)?, identifier_from_js(id)?)?)
    };
    toggle().map_err(|e| JsValue::from_str(&format!("Bit toggle failed: {e}")))
}

fn encode_ids(ids: JsValue) -> anyhow::Result<u32> {
    // Wide enough to tell negative and oversized numbers apart from malformed input.
    let raw: Vec<i64> = from_js(ids, "identifiers")?;

    let ids = raw
        .into_iter()
        .map(error::identifier)
        .collect::<Result<Vec<u32>>>()?;

    Ok(encode(ids)?)
}

fn identifier_from_js(id: JsValue) -> anyhow::Result<u32> {
    let raw: i64 = from_js(id, "identifier")?;
    Ok(error::identifier(raw)?)
}

fn mask_from_js(mask: JsValue) -> anyhow::Result<u32> {
    from_js(mask, "mask")
}

/// Rejects fractional, non-numeric and out-of-range numbers instead of coercing them.
fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> anyhow::Result<T> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| anyhow::anyhow!("Failed to deserialize {what}: {e}"))
}
