//! # Ledger Configuration
//!
//! Resolves the service-account credential and the database location.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. secrets.toml            ($LEDGER_SECRETS_PATH, optional)           │
//! │       FIREBASE_PRIVATE_KEY_B64 = "eyJ0eXBlIjoi..."                      │
//! │       database_path = "/var/lib/ledger/ventas.db"                      │
//! │       [SERVICE_ACCOUNT]                                                 │
//! │       type = "service_account"                                          │
//! │       project_id = "..."                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Environment             FIREBASE_PRIVATE_KEY_B64                    │
//! │                             SERVICE_ACCOUNT  (JSON text)                │
//! │                             LEDGER_DB_PATH                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Credential pick         base64 > table > JSON string               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerConfig { db: DbConfig(path, project_id), credential }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without a `database_path`, the database goes to the platform data
//! directory as `{project_id}.db`.

use ledger_core::{CredentialError, CredentialSource, ServiceAccountKey};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::pool::DbConfig;

/// Environment variable naming the secrets file.
pub const SECRETS_PATH_ENV: &str = "LEDGER_SECRETS_PATH";

/// Secrets file used when `LEDGER_SECRETS_PATH` is unset.
pub const DEFAULT_SECRETS_PATH: &str = "./secrets.toml";

/// Base64 credential key (file and environment).
pub const PRIVATE_KEY_B64_KEY: &str = "FIREBASE_PRIVATE_KEY_B64";

/// Structured or JSON-text credential key (file and environment).
pub const SERVICE_ACCOUNT_KEY: &str = "SERVICE_ACCOUNT";

/// Environment override for the database file.
pub const DB_PATH_ENV: &str = "LEDGER_DB_PATH";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read secrets file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid secrets file: {0}")]
    InvalidSecrets(#[from] toml::de::Error),

    #[error("No credential configured: set FIREBASE_PRIVATE_KEY_B64 or SERVICE_ACCOUNT")]
    MissingCredential,

    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] CredentialError),

    #[error("No data directory available for the default database path")]
    NoDataDir,
}

// =============================================================================
// Secrets
// =============================================================================

/// Raw secrets as read from the file and environment.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Secrets {
    #[serde(rename = "FIREBASE_PRIVATE_KEY_B64", default)]
    pub private_key_b64: Option<String>,

    #[serde(rename = "SERVICE_ACCOUNT", default)]
    pub service_account: Option<toml::Value>,

    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl Secrets {
    /// Parses secrets from TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads the secrets file. A missing file yields empty secrets.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(?path, "Secrets file not found, using environment only");
            return Ok(Secrets::default());
        }

        info!(?path, "Loading secrets file");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Applies overrides from `lookup` (the process environment in
    /// [`LedgerConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(blob) = lookup(PRIVATE_KEY_B64_KEY) {
            debug!("Overriding base64 credential from environment");
            self.private_key_b64 = Some(blob);
        }

        if let Some(json) = lookup(SERVICE_ACCOUNT_KEY) {
            debug!("Overriding service account from environment");
            self.service_account = Some(toml::Value::String(json));
        }

        if let Some(path) = lookup(DB_PATH_ENV) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Picks the credential source: base64 first, then a table, then JSON
    /// text.
    pub fn credential_source(&self) -> Option<CredentialSource> {
        if let Some(blob) = self.private_key_b64.as_ref().filter(|b| !b.trim().is_empty()) {
            return Some(CredentialSource::Base64(blob.clone()));
        }

        match self.service_account.as_ref()? {
            toml::Value::String(text) => Some(CredentialSource::Json(text.clone())),
            other => serde_json::to_value(other).ok().map(CredentialSource::Object),
        }
    }
}

// =============================================================================
// LedgerConfig
// =============================================================================

/// Everything needed to open the store.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Database settings, scoped to the credential's project.
    pub db: DbConfig,

    /// The decoded, validated service-account key.
    pub credential: ServiceAccountKey,
}

impl LedgerConfig {
    /// Loads configuration from the secrets file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(SECRETS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH));

        let mut secrets = Secrets::read(&path)?;
        secrets.apply_overrides(|key| env::var(key).ok());

        Self::from_secrets(secrets)
    }

    /// Builds configuration from already-gathered secrets.
    pub fn from_secrets(secrets: Secrets) -> Result<Self, ConfigError> {
        let source = secrets
            .credential_source()
            .ok_or(ConfigError::MissingCredential)?;
        let credential = ServiceAccountKey::from_source(&source)?;

        let database_path = match secrets.database_path {
            Some(path) => path,
            None => default_database_path(&credential.project_id)?,
        };

        info!(
            project = %credential.project_id,
            path = %database_path.display(),
            "Ledger configuration loaded"
        );

        Ok(LedgerConfig {
            db: DbConfig::new(database_path, credential.project_id.clone()),
            credential,
        })
    }
}

/// `{data_dir}/{project_id}.db` for this platform.
pub fn default_database_path(project_id: &str) -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("com", "ledger", "libro")
        .map(|dirs| dirs.data_dir().join(format!("{}.db", project_id)))
        .ok_or(ConfigError::NoDataDir)
}

// =============================================================================
// Unit Tests
// =============================================================================
