//! Remote item → [`PlanetPayload`] mapping.
//!
//! The remote source is loosely typed, so mapping is lenient and leaves the
//! real checks to [`PlanetPayload::into_upsert`]:
//!
//! - `population` of `null` or `"unknown"` counts as not provided, so an
//!   existing value survives and a new planet gets none.
//! - missing `climates`/`terrains` become empty lists, which clears that kind
//!   of tag on the planet.
//! - list entries that are not strings are skipped; a comma-separated string
//!   is split into names.

use planet_catalog_core::PlanetPayload;
use serde_json::Value;

/// Map one remote item. Fails only when the item is not a JSON object.
pub fn map_remote_planet(item: &Value) -> Result<PlanetPayload, String> {
    let Value::Object(fields) = item else {
        return Err("item is not a JSON object".to_owned());
    };

    let name = fields.get("name").and_then(Value::as_str).map(str::to_owned);
    let population = match fields.get("population") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s == "unknown" => None,
        Some(other) => Some(other.clone()),
    };

    Ok(PlanetPayload {
        name,
        population,
        climates: Some(string_list(fields.get("climates"))),
        terrains: Some(string_list(fields.get("terrains"))),
    })
}

/// How a batch item is named in failure reports: its trimmed name, or its
/// 1-based position when it has none.
#[must_use]
pub fn item_identifier(item: &Value, index: usize) -> String {
    item.get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("#{}", index.saturating_add(1)), str::to_owned)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => {
            items.iter().filter_map(Value::as_str).map(str::to_owned).collect()
        },
        Some(Value::String(joined)) => joined.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    }
}
