// Token manager: OAuth2 client-credentials exchange and token revocation.
//
// All three operations share one async mutex, so overlapping authenticate
// calls run one revoke+acquire pair at a time instead of racing on the
// stored token.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::credentials::{CredentialStore, Credentials};
use crate::endpoints::{self, REVOKE_PATH, TOKEN_PATH};
use crate::error::ServiceError;
use crate::transport::{HttpRequest, RequestBody, Transport};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

pub struct TokenManager {
    transport: Arc<dyn Transport>,
    store: Arc<CredentialStore>,
    in_flight: Mutex<()>,
}

impl TokenManager {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<CredentialStore>) -> Self {
        Self {
            transport,
            store,
            in_flight: Mutex::new(()),
        }
    }

    /// Exchange the client credentials for an access token and store it.
    ///
    /// The stored token is only touched on success.
    pub async fn acquire_token(&self) -> Result<String, ServiceError> {
        let _guard = self.in_flight.lock().await;
        self.acquire().await
    }

    /// Revoke the stored token and clear it on success.
    pub async fn revoke_token(&self) -> Result<(), ServiceError> {
        let _guard = self.in_flight.lock().await;
        self.revoke().await
    }

    /// Best-effort revoke of the current token followed by a fresh
    /// acquisition. A failed acquisition after a successful revoke leaves
    /// the client unauthenticated.
    pub async fn authenticate(&self) -> Result<String, ServiceError> {
        let _guard = self.in_flight.lock().await;
        if let Err(e) = self.revoke().await {
            tracing::debug!("Ignoring revoke failure before authentication: {}", e);
        }
        self.acquire().await
    }

    fn credentials(&self) -> Result<Credentials, ServiceError> {
        self.store.credentials().ok_or_else(|| {
            tracing::warn!("Client credentials were not provided");
            ServiceError::AuthMissing
        })
    }

    async fn acquire(&self) -> Result<String, ServiceError> {
        let credentials = self.credentials()?;

        let request = HttpRequest {
            url: endpoints::url(TOKEN_PATH),
            headers: vec![("Authorization".to_string(), basic_auth(&credentials))],
            body: RequestBody::Form(vec![(
                "grant_type".to_string(),
                "client_credentials".to_string(),
            )]),
        };

        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(ServiceError::NetworkFailure(format!(
                "token endpoint returned status {}",
                response.status
            )));
        }

        let token = serde_json::from_slice::<TokenResponse>(&response.body)
            .ok()
            .and_then(|body| body.access_token)
            .ok_or_else(|| {
                tracing::warn!("Token response did not contain an access token");
                ServiceError::MalformedResponse
            })?;

        self.store.set_access_token(&token)?;
        tracing::info!(token_len = token.len(), "Access token acquired");
        Ok(token)
    }

    async fn revoke(&self) -> Result<(), ServiceError> {
        let credentials = self.credentials()?;

        let request = HttpRequest {
            url: endpoints::url(REVOKE_PATH),
            headers: Vec::new(),
            body: RequestBody::Form(vec![
                ("token".to_string(), self.store.access_token()),
                ("client_id".to_string(), credentials.client_id),
                ("token_type_hint".to_string(), "access_token".to_string()),
            ]),
        };

        let response = self.transport.post(request).await?;
        if !response.is_success() {
            return Err(ServiceError::NetworkFailure(format!(
                "revoke endpoint returned status {}",
                response.status
            )));
        }

        self.store.clear_access_token()?;
        tracing::info!("Access token revoked");
        Ok(())
    }
}

/// `Authorization` value for HTTP Basic auth with the client credentials.
fn basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}
