// Error taxonomy shared by every client operation. All failures travel back
// to the caller through the returned `Result`; nothing here panics.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors reported by the Texie Cloud client.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// `configure` was never called, so there is nothing to authenticate with.
    #[error("client credentials were not provided")]
    AuthMissing,

    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The annotation endpoint answered with something other than 201.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// A success status whose body lacks the expected fields.
    #[error("malformed response received from service")]
    MalformedResponse,

    #[error("failed to encode request: {0}")]
    EncodingFailure(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<TransportError> for ServiceError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Encoding(cause) => ServiceError::EncodingFailure(cause),
            TransportError::Network(cause) => ServiceError::NetworkFailure(cause),
        }
    }
}
