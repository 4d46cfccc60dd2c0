use std::time::Duration;

use serde_json::Value;

use crate::error::RemoteError;

/// Longest slice of an upstream body kept in errors and logs.
const MAX_BODY_SNIPPET: usize = 200;

/// Path of the planet array in the remote response.
const PLANETS_POINTER: &str = "/data/allPlanets/planets";

/// Client for the remote planets endpoint.
#[derive(Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    planets_url: String,
}

impl std::fmt::Debug for SwapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapiClient").field("planets_url", &self.planets_url).finish_non_exhaustive()
    }
}

impl SwapiClient {
    /// Build a client for `planets_url` whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(planets_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::ClientInit(e.to_string()))?;
        Ok(Self { client, planets_url: planets_url.into() })
    }

    #[must_use]
    pub fn planets_url(&self) -> &str {
        &self.planets_url
    }

    /// GET the planet list and return the raw items.
    ///
    /// A body without a `data.allPlanets.planets` array yields an empty list.
    ///
    /// # Errors
    /// Returns an error on connection failure or timeout, a non-2xx status, or
    /// a body that is not JSON.
    pub async fn fetch_planets(&self) -> Result<Vec<Value>, RemoteError> {
        let response = self.client.get(&self.planets_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(RemoteError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, MAX_BODY_SNIPPET).to_owned(),
            });
        }

        let body = response.text().await?;
        let document: Value = serde_json::from_str(&body).map_err(|e| RemoteError::JsonParse {
            context: format!("planets response (body: {})", truncate(&body, MAX_BODY_SNIPPET)),
            source: e,
        })?;

        match document.pointer(PLANETS_POINTER).and_then(Value::as_array) {
            Some(items) => Ok(items.clone()),
            None => {
                tracing::warn!(url = %self.planets_url, "remote response has no planet list");
                Ok(Vec::new())
            },
        }
    }
}

/// Cut `s` to at most `max` bytes on a char boundary.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
