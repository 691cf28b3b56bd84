//! Bearer tokens for the Spotify Web API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::{CatalogError, CatalogResult};
use crate::spotify::{SOURCE_NAME, USER_AGENT};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Tokens are refreshed this long before the advertised expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Supplies a bearer token for catalog requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> CatalogResult<String>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Client credentials flow: exchanges the application ID and secret for
/// an app-only access token, cached until shortly before it expires.
#[derive(Debug)]
pub struct ClientCredentialsAuth {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsAuth {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> CatalogResult<Self> {
        Self::with_token_url(client_id, client_secret, TOKEN_URL)
    }

    /// Use a different token endpoint.
    pub fn with_token_url(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> CatalogResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        })
    }

    async fn request_token(&self) -> CatalogResult<TokenResponse> {
        log::debug!("Requesting Spotify access token");

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized {
                source_name: SOURCE_NAME.to_string(),
            });
        }

        let response = response.error_for_status().map_err(|e| CatalogError::Http {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        response.json().await.map_err(|e| CatalogError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsAuth {
    async fn access_token(&self) -> CatalogResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.request_token().await?;
        let lifetime = Duration::from_secs(fresh.expires_in).saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            value: fresh.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(fresh.access_token)
    }
}

/// A fixed token, for callers that obtained one elsewhere.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> CatalogResult<String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_token_response() {
        let json = r#"{
            "access_token": "NgCXRKc...MzYjw",
            "token_type": "Bearer",
            "expires_in": 3600
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "NgCXRKc...MzYjw");
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn test_deserialize_token_response_without_expiry() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken("abc".to_string());
        assert_eq!(provider.access_token().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_cached_token_is_reused() {
        let auth = ClientCredentialsAuth::with_token_url("id", "secret", "http://127.0.0.1:9/token")
            .unwrap();
        *auth.cached.lock().await = Some(CachedToken {
            value: "cached".to_string(),
            refresh_at: Instant::now() + Duration::from_secs(600),
        });
        assert_eq!(auth.access_token().await.unwrap(), "cached");
    }
}
