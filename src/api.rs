// API facade: the single entry point the application talks to. It owns the
// credential store and wires it into the token manager and the annotation
// client; every method simply delegates.

use std::sync::Arc;

use reqwest::Url;

use crate::annotate::{AnnotationClient, AnnotationResult};
use crate::credentials::{CredentialStore, TokenStore};
use crate::endpoints;
use crate::error::ServiceError;
use crate::token::TokenManager;
use crate::transport::Transport;

/// Texie Cloud client. Construct it once and share it (e.g. behind an
/// `Arc`) for the lifetime of the application.
pub struct TexieCloud {
    credentials: Arc<CredentialStore>,
    tokens: TokenManager,
    annotations: AnnotationClient,
}

impl TexieCloud {
    /// Build a client over the given transport and durable token slot.
    pub fn new(transport: Arc<dyn Transport>, token_store: Arc<dyn TokenStore>) -> Self {
        let credentials = Arc::new(CredentialStore::new(token_store));
        Self {
            tokens: TokenManager::new(transport.clone(), credentials.clone()),
            annotations: AnnotationClient::new(transport, credentials.clone()),
            credentials,
        }
    }

    /// Set the client id and secret from the Texie Cloud dashboard. Must
    /// happen before any authenticate or annotate call.
    pub fn configure(&self, client_id: &str, client_secret: &str) {
        self.credentials.set_credentials(client_id, client_secret);
    }

    /// Absolute URL for a relative image path returned by `annotate`.
    pub fn image_url(&self, relative_path: &str) -> Result<Url, ServiceError> {
        let raw = endpoints::url(relative_path);
        Url::parse(&raw).map_err(|e| ServiceError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Revoke the current token (ignoring the outcome) and fetch a new one.
    pub async fn authenticate(&self) -> Result<String, ServiceError> {
        self.tokens.authenticate().await
    }

    pub async fn acquire_token(&self) -> Result<String, ServiceError> {
        self.tokens.acquire_token().await
    }

    pub async fn revoke(&self) -> Result<(), ServiceError> {
        self.tokens.revoke_token().await
    }

    pub async fn annotate(
        &self,
        image: Vec<u8>,
        store: bool,
    ) -> Result<AnnotationResult, ServiceError> {
        self.annotations.annotate(image, store).await
    }

    pub fn access_token(&self) -> String {
        self.credentials.access_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.credentials().is_some()
    }
}
