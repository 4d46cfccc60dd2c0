//! Process configuration, read once from the environment at startup.

use std::time::Duration;

use crate::{DEFAULT_DATABASE_URL, DEFAULT_REMOTE_TIMEOUT_SECS, non_blank, parse_or_default, split_list};

/// Settings shared by the server and the CLI sync command.
#[derive(Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// `postgres://…` or `sqlite://…`.
    pub database_url: String,
    /// Remote planet list; `None` makes sync fail with a configuration error.
    pub swapi_planets_url: Option<String>,
    pub swapi_timeout: Duration,
    /// Bearer token required on mutations. `None` leaves mutations open.
    pub api_token: Option<String>,
    /// Accepted `Host` values. Empty means any host.
    pub allowed_hosts: Vec<String>,
}

impl CatalogConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| non_blank(lookup(var));

        let database_url = get("DATABASE_URL")
            .or_else(|| {
                get("POSTGRES_DB").map(|db| {
                    postgres_url(
                        &get("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_owned()),
                        &get("POSTGRES_PORT").unwrap_or_else(|| "5432".to_owned()),
                        &get("POSTGRES_USER").unwrap_or_else(|| "postgres".to_owned()),
                        get("POSTGRES_PASSWORD").as_deref(),
                        &db,
                    )
                })
            })
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let timeout_secs = parse_or_default(
            "SWAPI_TIMEOUT_SECS",
            get("SWAPI_TIMEOUT_SECS").as_deref(),
            DEFAULT_REMOTE_TIMEOUT_SECS,
        );

        let allowed_hosts = get("ALLOWED_HOSTS")
            .map(|raw| split_list(&raw))
            .filter(|hosts| !hosts.iter().any(|h| h == "*"))
            .unwrap_or_default();

        Self {
            database_url,
            swapi_planets_url: get("SWAPI_PLANETS_URL"),
            swapi_timeout: Duration::from_secs(timeout_secs.max(1)),
            api_token: get("PLANET_CATALOG_API_TOKEN"),
            allowed_hosts,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("database_url", &redact_credentials(&self.database_url))
            .field("swapi_planets_url", &self.swapi_planets_url)
            .field("swapi_timeout", &self.swapi_timeout)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("allowed_hosts", &self.allowed_hosts)
            .finish()
    }
}

fn postgres_url(host: &str, port: &str, user: &str, password: Option<&str>, db: &str) -> String {
    match password {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{db}"),
        None => format!("postgres://{user}@{host}:{port}/{db}"),
    }
}

/// Replace the `user:password@` part of a URL with `***@`.
#[must_use]
pub fn redact_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &url[..scheme_end + 3], &url[at..])
        },
        _ => url.to_owned(),
    }
}
