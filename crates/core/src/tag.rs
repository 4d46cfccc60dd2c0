//! Climate and terrain tags.
//!
//! Both kinds share one shape (`id` + unique `name`) and one normalization rule:
//! trim surrounding whitespace, then match names exactly (case-sensitive).

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MAX_NAME_LEN, ValidationError};

/// Which tag vocabulary a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Climate,
    Terrain,
}

impl TagKind {
    pub const ALL: [Self; 2] = [Self::Climate, Self::Terrain];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Climate => "climate",
            Self::Terrain => "terrain",
        }
    }

    /// Table holding the tag rows.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Climate => "climates",
            Self::Terrain => "terrains",
        }
    }

    /// Link table between planets and this kind.
    #[must_use]
    pub const fn link_table(self) -> &'static str {
        match self {
            Self::Climate => "planet_climates",
            Self::Terrain => "planet_terrains",
        }
    }

    /// Foreign-key column in [`Self::link_table`].
    #[must_use]
    pub const fn link_column(self) -> &'static str {
        match self {
            Self::Climate => "climate_id",
            Self::Terrain => "terrain_id",
        }
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert/update metadata shared by every persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// A persisted climate or terrain. Audit columns stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(skip)]
    pub audit: Audit,
}

/// Tag identity as returned by the normalizer (no audit row read back).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagRef {
    pub id: i64,
    pub name: String,
}

/// Unvalidated tag body for create and rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagPayload {
    #[serde(default)]
    pub name: Option<String>,
}

impl TagPayload {
    /// The trimmed name, or the field errors.
    pub fn into_name(self) -> Result<String, ValidationError> {
        validate_tag_name(self.name.as_deref())
    }
}

/// Trim every name, drop blanks and repeats. First occurrence wins the position.
#[must_use]
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty() && seen.insert(*n))
        .map(str::to_owned)
        .collect()
}

/// Validate a single tag name for tag CRUD, returning it trimmed.
pub fn validate_tag_name(name: Option<&str>) -> Result<String, ValidationError> {
    validate_name("name", name)
}

/// Apply the tag-name length rule to every entry of a planet's tag list.
///
/// Blank entries are left for the normalizer to drop.
pub(crate) fn check_tag_names(field: &str, names: Option<&[String]>, errors: &mut ValidationError) {
    let Some(names) = names else { return };
    if names.iter().any(|n| n.trim().chars().count() > MAX_NAME_LEN) {
        errors.add(field, too_long());
    }
}

fn too_long() -> String {
    format!("Ensure this field has no more than {MAX_NAME_LEN} characters.")
}

pub(crate) fn validate_name(field: &str, name: Option<&str>) -> Result<String, ValidationError> {
    let Some(name) = name else {
        return Err(ValidationError::field(field, "This field is required."));
    };
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::field(field, "This field may not be blank."));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::field(field, too_long()));
    }
    Ok(trimmed.to_owned())
}
