//! Request gates: bearer-token check for mutations and the `Host` allow-list.

use std::future;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{AUTHORIZATION, HOST};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use planet_catalog_core::RequestContext;

use crate::AppState;
use crate::api_error::ApiError;

/// Header naming the principal recorded in audit columns.
pub const ACTOR_HEADER: &str = "x-actor";

/// Actor recorded for token-authenticated calls without [`ACTOR_HEADER`].
const TOKEN_ACTOR: &str = "api-token";

/// Caller allowed to mutate the catalog.
///
/// Rejects with 401 when a token is configured and the request does not carry
/// it as `Authorization: Bearer <token>`. With no token configured every
/// caller passes.
#[derive(Debug, Clone)]
pub struct Authorized(pub RequestContext);

impl FromRequestParts<Arc<AppState>> for Authorized {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        future::ready(authorize(parts, state.api_token.as_deref()))
    }
}

fn authorize(parts: &Parts, token: Option<&str>) -> Result<Authorized, ApiError> {
    let actor = parts
        .headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let Some(expected) = token else {
        return Ok(Authorized(actor.map_or_else(RequestContext::anonymous, RequestContext::new)));
    };

    let presented = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(presented) if constant_time_eq(presented.as_bytes(), expected.as_bytes()) => {
            Ok(Authorized(RequestContext::new(actor.unwrap_or(TOKEN_ACTOR))))
        },
        _ => Err(ApiError::Unauthorized),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Middleware rejecting requests whose `Host` is not allowed.
pub async fn enforce_allowed_hosts(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.allowed_hosts.is_empty() {
        return next.run(request).await;
    }
    let host = request.headers().get(HOST).and_then(|v| v.to_str().ok()).unwrap_or_default();
    if host_allowed(host, &state.allowed_hosts) {
        next.run(request).await
    } else {
        ApiError::DisallowedHost(host.to_owned()).into_response()
    }
}

/// Match a `Host` header against the allow-list, ignoring case and port.
///
/// An entry starting with `.` also matches every subdomain.
pub(crate) fn host_allowed(host: &str, allowed: &[String]) -> bool {
    let host = strip_port(host).to_ascii_lowercase();
    if host.is_empty() {
        return false;
    }
    allowed.iter().any(|pattern| {
        let pattern = pattern.to_ascii_lowercase();
        match pattern.strip_prefix('.') {
            Some(domain) => host == domain || host.ends_with(&pattern),
            None => host == pattern,
        }
    })
}

fn strip_port(host: &str) -> &str {
    let host = host.trim();
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}
