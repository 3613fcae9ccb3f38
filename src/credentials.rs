// Credential store: client id/secret live in memory for the lifetime of the
// client, the access token lives in a durable `TokenStore` so a restart can
// reuse it.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::ServiceError;

/// Client credentials issued by the Texie Cloud dashboard.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Durable slot holding at most one access token.
pub trait TokenStore: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
}

/// Keeps the token in memory only. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already in the slot.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| io::Error::other("token lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| io::Error::other("token lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }
}

/// Persists the token into a plain file, by default `~/.texie_token`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Token file in the user's home directory (or the current directory
    /// when no home directory can be found).
    pub fn default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(".texie_token"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data.trim_end().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token)
    }
}

/// In-memory credentials plus the durable token slot.
pub struct CredentialStore {
    credentials: RwLock<Option<Credentials>>,
    tokens: Arc<dyn TokenStore>,
}

impl CredentialStore {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            credentials: RwLock::new(None),
            tokens,
        }
    }

    /// Replace the client credentials. Calling it again with the same
    /// values changes nothing.
    pub fn set_credentials(&self, client_id: &str, client_secret: &str) {
        let credentials = Credentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };
        match self.credentials.write() {
            Ok(mut slot) => *slot = Some(credentials),
            Err(poisoned) => *poisoned.into_inner() = Some(credentials),
        }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match self.credentials.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Current access token, or an empty string when unauthenticated.
    pub fn access_token(&self) -> String {
        match self.tokens.load() {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read stored access token: {}", e);
                String::new()
            }
        }
    }

    pub fn set_access_token(&self, token: &str) -> Result<(), ServiceError> {
        self.tokens.save(token)?;
        Ok(())
    }

    pub fn clear_access_token(&self) -> Result<(), ServiceError> {
        self.set_access_token("")
    }

    pub fn is_authenticated(&self) -> bool {
        !self.access_token().is_empty()
    }
}
