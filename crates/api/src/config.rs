/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The resolved frontend URL is always included.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Idle window after which a session is discarded (default: `3600`).
    pub session_idle_secs: u64,
    /// Public URL the frontend is served from.
    pub frontend_url: String,
    /// Dataset host configuration.
    pub hub: HubConfig,
}

/// Dataset host connection settings.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Base URL of the dataset host (default: `https://huggingface.co`).
    pub endpoint: String,
    /// Access token; when unset, export requests fail with a clear message
    /// but the server runs normally.
    pub token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                     |
    /// | `SESSION_IDLE_SECS`     | `3600`                   |
    /// | `HUB_ENDPOINT`          | `https://huggingface.co` |
    /// | `HUB_TOKEN`             | unset                    |
    ///
    /// The frontend URL is resolved from `FRONTEND_DEPLOY_URL`, then
    /// `PUBLIC_DOMAIN`, then `DEPLOY_URL` (first set wins; scheme-less
    /// values get `https://`), defaulting to `http://localhost:3000`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let session_idle_secs: u64 = std::env::var("SESSION_IDLE_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_IDLE_SECS must be a valid u64");

        let frontend_url = resolve_frontend_url(
            std::env::var("FRONTEND_DEPLOY_URL").ok(),
            std::env::var("PUBLIC_DOMAIN").ok(),
            std::env::var("DEPLOY_URL").ok(),
        );

        let mut cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        // The deployed frontend must always be allowed.
        if !cors_origins.contains(&frontend_url) {
            cors_origins.push(frontend_url.clone());
        }

        let hub = HubConfig {
            endpoint: std::env::var("HUB_ENDPOINT")
                .unwrap_or_else(|_| "https://huggingface.co".into()),
            token: std::env::var("HUB_TOKEN").ok(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session_idle_secs,
            frontend_url,
            hub,
        }
    }
}

/// Resolve the public frontend URL from the deployment variables.
///
/// Precedence: deploy-script value, then platform-provided public domain,
/// then the legacy variable. Platform domains often arrive without a
/// scheme, so scheme-less values are prefixed with `https://`.
fn resolve_frontend_url(
    deploy_url: Option<String>,
    public_domain: Option<String>,
    legacy_url: Option<String>,
) -> String {
    let raw = deploy_url
        .or(public_domain)
        .or(legacy_url)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw
    } else {
        format!("https://{raw}")
    }
}
