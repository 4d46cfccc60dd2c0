//! Request-scoped context carried into every mutating operation.

use serde::{Deserialize, Serialize};

/// The acting principal of a write, recorded in audit columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    actor: Option<String>,
}

impl RequestContext {
    /// Context for a named principal. Blank names are treated as anonymous.
    #[must_use]
    pub fn new(actor: impl Into<String>) -> Self {
        let actor = actor.into();
        let trimmed = actor.trim();
        if trimmed.is_empty() {
            Self::anonymous()
        } else {
            Self { actor: Some(trimmed.to_owned()) }
        }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self { actor: None }
    }

    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}
