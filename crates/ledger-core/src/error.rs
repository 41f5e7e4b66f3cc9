//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledger-core errors (this file)                                        │
//! │  ├── ValidationError  - Bad identifiers (user ID, document ID)         │
//! │  └── CredentialError  - Service-account key could not be decoded       │
//! │                                                                         │
//! │  ledger-db errors (separate crate)                                     │
//! │  ├── DbError          - Document store failures                        │
//! │  └── ConfigError      - Secrets/config loading failures                │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → caller                              │
//! │        CredentialError → ConfigError → caller                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads never raise on numeric parse failures: they coerce to 0.0. Derived
//! transaction writes report a bad amount as `ValidationError::InvalidFormat`.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Identifiers and the amounts of derived transactions are validated.
/// Caller-supplied records are stored as-is.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., a path separator inside an ID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Credential Error
// =============================================================================

/// Service-account credential decoding errors.
///
/// ## When These Occur
/// ```text
/// FIREBASE_PRIVATE_KEY_B64 ──► base64 decode ──► Base64
///                                    │
///                                    ▼
///                              UTF-8 + JSON  ──► Json
///                                    │
///                                    ▼
///                               field checks ──► MissingField / InvalidType
///                                                / InvalidPrivateKey
/// ```
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The base64 blob could not be decoded.
    #[error("Invalid base64 credential: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes were not UTF-8.
    #[error("Credential is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The payload was not a valid service-account JSON document.
    #[error("Invalid credential JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required key is missing or empty.
    #[error("Credential is missing required field '{0}'")]
    MissingField(&'static str),

    /// The `type` key is not `service_account`.
    #[error("Credential type must be 'service_account', got '{0}'")]
    InvalidType(String),

    /// The private key is not a PEM private key.
    #[error("Credential private_key is not a PEM private key")]
    InvalidPrivateKey,
}

// =============================================================================
// Unit Tests
// =============================================================================
