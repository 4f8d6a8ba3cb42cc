//! Static-token authentication for the CRUD router.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use super::error::ApiError;

/// Security configuration loaded from environment variables.
#[derive(Clone, Debug, Default)]
pub struct SecurityConfig {
    /// Shared secret every request must present (from API_SECRET_TOKEN).
    /// When unset, every request is rejected.
    pub api_token: Option<String>,
}

impl SecurityConfig {
    /// Load security configuration from environment variables.
    pub fn from_env() -> Self {
        let api_token = std::env::var("API_SECRET_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        if api_token.is_none() {
            tracing::warn!("API_SECRET_TOKEN is not set; all CRUD requests will be rejected");
        }
        Self { api_token }
    }

    /// Create a config with the given token (for testing).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
        }
    }

    /// Whether `supplied` matches the configured token.
    pub fn accepts(&self, supplied: Option<&str>) -> bool {
        match (self.api_token.as_deref(), supplied) {
            (Some(expected), Some(token)) if !expected.is_empty() => token == expected,
            _ => false,
        }
    }
}

/// Token from the `token` query parameter, else from `Authorization: Bearer <token>`.
pub fn extract_token(request: &Request<Body>) -> Option<String> {
    let from_query = request.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, value)| key == "token" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    });
    if from_query.is_some() {
        return from_query;
    }

    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .and_then(|rest| rest.split(' ').next())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Authentication middleware that checks for the shared API token.
pub async fn auth_middleware(
    State(config): State<SecurityConfig>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&request);

    if config.accepts(token.as_deref()) {
        return Ok(next.run(request).await);
    }

    match token {
        Some(_) => tracing::warn!("Invalid API token provided"),
        None => tracing::warn!("Missing API token"),
    }
    Err(ApiError::unauthorized())
}
