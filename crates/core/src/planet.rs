//! Planet domain types and input validation.
//!
//! Inputs distinguish "field not provided" from "field provided as null":
//! `population: Option<Option<i64>>` is `None` when the caller left it out and
//! `Some(None)` when the caller explicitly cleared it. Tag lists follow the same
//! rule: `None` leaves the planet's tags alone, `Some(vec![])` clears them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::tag::{Audit, TagKind, check_tag_names, validate_name};
use crate::ValidationError;

const INVALID_INTEGER: &str = "A valid integer is required.";
const NEGATIVE_POPULATION: &str = "Ensure this value is greater than or equal to 0.";

/// A persisted planet with its tag names (sorted ascending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub population: Option<i64>,
    pub climates: Vec<String>,
    pub terrains: Vec<String>,
    #[serde(skip)]
    pub audit: Audit,
}

impl Planet {
    #[must_use]
    pub fn tags(&self, kind: TagKind) -> &[String] {
        match kind {
            TagKind::Climate => &self.climates,
            TagKind::Terrain => &self.terrains,
        }
    }
}

/// Validated find-or-create input keyed by planet name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetUpsert {
    pub name: String,
    pub population: Option<Option<i64>>,
    pub climates: Option<Vec<String>>,
    pub terrains: Option<Vec<String>>,
}

impl PlanetUpsert {
    /// Upsert that only ensures the planet exists.
    ///
    /// The name is used as given; go through [`PlanetPayload::into_upsert`] for
    /// untrusted input.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), population: None, climates: None, terrains: None }
    }

    #[must_use]
    pub const fn with_population(mut self, population: Option<i64>) -> Self {
        self.population = Some(population);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, kind: TagKind, names: Vec<String>) -> Self {
        match kind {
            TagKind::Climate => self.climates = Some(names),
            TagKind::Terrain => self.terrains = Some(names),
        }
        self
    }

    #[must_use]
    pub fn tags(&self, kind: TagKind) -> Option<&[String]> {
        match kind {
            TagKind::Climate => self.climates.as_deref(),
            TagKind::Terrain => self.terrains.as_deref(),
        }
    }
}

/// Validated changes for a planet located by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetPatch {
    pub name: Option<String>,
    pub population: Option<Option<i64>>,
    pub climates: Option<Vec<String>>,
    pub terrains: Option<Vec<String>>,
}

impl PlanetPatch {
    #[must_use]
    pub fn tags(&self, kind: TagKind) -> Option<&[String]> {
        match kind {
            TagKind::Climate => self.climates.as_deref(),
            TagKind::Terrain => self.terrains.as_deref(),
        }
    }
}

/// Unvalidated planet body, as received over HTTP or mapped from the remote source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlanetPayload {
    #[serde(default)]
    pub name: Option<String>,
    /// `None` = not provided, `Some(Value::Null)` = explicitly null.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub population: Option<Value>,
    #[serde(default)]
    pub climates: Option<Vec<String>>,
    #[serde(default)]
    pub terrains: Option<Vec<String>>,
}

impl PlanetPayload {
    /// Validate as a find-or-create request: `name` is required.
    pub fn into_upsert(self) -> Result<PlanetUpsert, ValidationError> {
        let mut errors = ValidationError::new();
        let name = validate_name("name", self.name.as_deref())
            .map_err(|e| merge_into(&mut errors, e))
            .ok();
        let population = self.population_field(&mut errors);
        self.tag_fields(&mut errors);
        let upsert = name.map(|name| PlanetUpsert {
            name,
            population,
            climates: self.climates,
            terrains: self.terrains,
        });
        match upsert {
            Some(upsert) => errors.into_result(upsert),
            None => Err(errors),
        }
    }

    /// Validate as an update by id. `require_name` is set for full replacement (PUT).
    pub fn into_patch(self, require_name: bool) -> Result<PlanetPatch, ValidationError> {
        let mut errors = ValidationError::new();
        let name = if require_name || self.name.is_some() {
            validate_name("name", self.name.as_deref())
                .map_err(|e| merge_into(&mut errors, e))
                .ok()
        } else {
            None
        };
        let population = self.population_field(&mut errors);
        self.tag_fields(&mut errors);
        errors.into_result(PlanetPatch {
            name,
            population,
            climates: self.climates,
            terrains: self.terrains,
        })
    }

    fn tag_fields(&self, errors: &mut ValidationError) {
        check_tag_names("climates", self.climates.as_deref(), errors);
        check_tag_names("terrains", self.terrains.as_deref(), errors);
    }

    fn population_field(&self, errors: &mut ValidationError) -> Option<Option<i64>> {
        let raw = self.population.as_ref()?;
        match parse_population(raw) {
            Ok(population) => Some(population),
            Err(message) => {
                errors.add("population", message);
                None
            },
        }
    }
}

/// Parse a population value.
///
/// Accepts JSON integers, integral floats and numeric strings. `null`, blank
/// strings and the literal `"unknown"` mean "no population recorded". Negative
/// and non-numeric values are rejected with a user-facing message.
pub fn parse_population(value: &Value) -> Result<Option<i64>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            if s == "unknown" {
                return Ok(None);
            }
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            let n: i64 = s.parse().map_err(|_| INVALID_INTEGER)?;
            non_negative(n)
        },
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return non_negative(i);
            }
            if n.is_u64() {
                return Err(INVALID_INTEGER);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f < 0.0 => Err(NEGATIVE_POPULATION),
                Some(f) if f.is_finite() && f.fract() == 0.0 && f < i64::MAX as f64 => {
                    Ok(Some(f as i64))
                },
                _ => Err(INVALID_INTEGER),
            }
        },
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(INVALID_INTEGER),
    }
}

const fn non_negative(n: i64) -> Result<Option<i64>, &'static str> {
    if n < 0 { Err(NEGATIVE_POPULATION) } else { Ok(Some(n)) }
}

fn merge_into(errors: &mut ValidationError, other: ValidationError) {
    for (field, messages) in other.fields() {
        for message in messages {
            errors.add(field, message.clone());
        }
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
