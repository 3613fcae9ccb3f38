// Library root
// -----------
// This crate exposes the Texie Cloud client as a library; the binary
// (`main.rs`) wraps it in an interactive CLI.
//
// Module responsibilities:
// - `credentials`: client id/secret in memory, access token in a durable
//   token store (file or memory).
// - `token`: OAuth2 client-credentials exchange and token revocation.
// - `annotate`: authenticated multipart upload and response parsing.
// - `api`: the `TexieCloud` facade callers use.
// - `transport`: the HTTP seam (reqwest in production, fakes in tests).
// - `preprocess`: optional image preparation done before upload.
// - `config`, `logging`, `ui`: CLI plumbing.
pub mod annotate;
pub mod api;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod preprocess;
pub mod token;
pub mod transport;
pub mod ui;

pub use annotate::AnnotationResult;
pub use api::TexieCloud;
pub use credentials::{CredentialStore, Credentials, FileTokenStore, MemoryTokenStore, TokenStore};
pub use error::ServiceError;
pub use preprocess::{prepare_jpeg, PrepareOptions, PreprocessError};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, RequestBody, Transport, TransportError};
