//! Size-column helpers for the bulk size update.

use serde_json::{Map, Value};

const FL_OZ_PER_ML: f64 = 0.033_814;

/// Derive the imperial display size from a metric one.
///
/// `"130 ml"` becomes `"4.4 fl oz"`. Sizes that aren't millilitres
/// (capsule counts, unit packs) have no imperial equivalent and yield `None`.
pub fn ml_to_fl_oz(size: &str) -> Option<String> {
    let lower = size.to_lowercase();
    if !lower.contains("ml") {
        return None;
    }
    let ml: f64 = lower.replace("ml", "").trim().parse().ok()?;
    Some(format!("{:.1} fl oz", ml * FL_OZ_PER_ML))
}

/// Column payload for a size update: always `size_ml`, plus `size_fl_oz`
/// when it can be derived.
pub fn size_fields(size: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("size_ml".to_string(), Value::String(size.to_string()));
    if let Some(fl_oz) = ml_to_fl_oz(size) {
        fields.insert("size_fl_oz".to_string(), Value::String(fl_oz));
    }
    fields
}
