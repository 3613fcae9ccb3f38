// CLI configuration read from environment variables. The service host is
// fixed; only credentials, the token file and image preparation can be
// tuned.

use std::path::PathBuf;

use crate::credentials::FileTokenStore;
use crate::preprocess::PrepareOptions;

#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_file: Option<PathBuf>,
    pub prepare: PrepareOptions,
}

impl CliConfig {
    /// Read `TEXIE_CLIENT_ID`, `TEXIE_CLIENT_SECRET`, `TEXIE_TOKEN_FILE`,
    /// `TEXIE_MAX_WIDTH` and `TEXIE_JPEG_QUALITY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = PrepareOptions::default();

        let max_width = match non_empty("TEXIE_MAX_WIDTH").map(|v| v.trim().parse::<u32>()) {
            Some(Ok(0)) => None,
            Some(Ok(width)) => Some(width),
            Some(Err(_)) => {
                tracing::warn!("Ignoring invalid TEXIE_MAX_WIDTH");
                defaults.max_width
            }
            None => defaults.max_width,
        };
        let quality = match non_empty("TEXIE_JPEG_QUALITY").map(|v| v.trim().parse::<u8>()) {
            Some(Ok(q)) => q.clamp(1, 100),
            Some(Err(_)) => {
                tracing::warn!("Ignoring invalid TEXIE_JPEG_QUALITY");
                defaults.quality
            }
            None => defaults.quality,
        };

        Self {
            client_id: non_empty("TEXIE_CLIENT_ID"),
            client_secret: non_empty("TEXIE_CLIENT_SECRET"),
            token_file: non_empty("TEXIE_TOKEN_FILE").map(PathBuf::from),
            prepare: PrepareOptions { max_width, quality },
        }
    }

    /// Credentials, when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    pub fn token_store(&self) -> FileTokenStore {
        match &self.token_file {
            Some(path) => FileTokenStore::new(path),
            None => FileTokenStore::default_location(),
        }
    }
}
