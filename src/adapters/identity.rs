//! Client-credentials token acquisition against the Microsoft identity platform.
//!
//! Two ways of handing a token to the Graph client:
//! - [`ClientSecretCredential`] acquires lazily and re-acquires once the cached
//!   token is about to expire.
//! - [`ConfidentialClient`] acquires once up front; the result is wrapped in a
//!   [`StaticTokenProvider`] that returns it unchanged.

use crate::domain::model::{AccessToken, TokenErrorResponse, TokenResponse};
use crate::domain::ports::{ConfigProvider, CredentialProvider};
use crate::utils::error::{GraphError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

/// `{authority}/{tenant}/oauth2/v2.0/token` 的 client-credentials 請求
#[derive(Clone)]
pub struct TokenEndpoint {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl TokenEndpoint {
    pub fn new(
        client: Client,
        authority: &str,
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url(authority, tenant_id),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: scope.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(client: Client, config: &C) -> Self {
        Self::new(
            client,
            config.authority(),
            config.tenant_id(),
            config.client_id(),
            config.client_secret(),
            config.scope(),
        )
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    pub async fn request_token(&self) -> Result<AccessToken> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        tracing::debug!("Requesting token from: {}", self.token_url);
        let response = self.client.post(&self.token_url).form(&params).send().await?;
        let status = response.status();
        tracing::debug!("Token endpoint status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (code, description) = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => (err.error, err.error_description),
                Err(_) => (
                    status
                        .canonical_reason()
                        .unwrap_or("http_error")
                        .to_string(),
                    body,
                ),
            };
            return Err(GraphError::AuthenticationError {
                status: status.as_u16(),
                code,
                description,
            });
        }

        let token: TokenResponse = response.json().await?;
        let token = AccessToken::from_response(token);
        tracing::debug!(
            "Acquired {} token, expires at {:?}",
            token.token_type,
            token.expires_at
        );
        Ok(token)
    }
}

fn token_url(authority: &str, tenant_id: &str) -> String {
    format!(
        "{}/{}/oauth2/v2.0/token",
        authority.trim_end_matches('/'),
        tenant_id.trim()
    )
}

/// 依需求取得 token，並在行程內快取直到接近到期
pub struct ClientSecretCredential {
    endpoint: TokenEndpoint,
    cached: Mutex<Option<AccessToken>>,
}

impl ClientSecretCredential {
    pub fn new(endpoint: TokenEndpoint) -> Self {
        Self {
            endpoint,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CredentialProvider for ClientSecretCredential {
    async fn access_token(&self) -> Result<AccessToken> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
            tracing::debug!("Cached token expired, requesting a new one");
        }

        let token = self.endpoint.request_token().await?;
        *cached = Some(token.clone());
        Ok(token)
    }
}

/// 先取得 token，再交給 Graph client 使用
pub struct ConfidentialClient {
    endpoint: TokenEndpoint,
}

impl ConfidentialClient {
    pub fn new(endpoint: TokenEndpoint) -> Self {
        Self { endpoint }
    }

    pub async fn acquire_token_for_client(&self) -> Result<AccessToken> {
        self.endpoint.request_token().await
    }
}

/// 永遠回傳同一個 token，不會自動更新
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        Ok(self.token.clone())
    }
}
