//! # Validation Module
//!
//! Identifier validation for the document store.
//!
//! ## What Gets Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Scope                                   │
//! │                                                                         │
//! │  usuarios/{user_id}/clientes/{document_id}                             │
//! │            ▲                      ▲                                     │
//! │            │                      │                                     │
//! │     validate_user_id      validate_document_id                         │
//! │                                                                         │
//! │  Record fields (Fecha, Total, ...) are NOT validated: malformed         │
//! │  records are accepted and stored as-is.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `/` inside an identifier would change the document path and escape the
//! user's root document, so both validators reject it.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted identifier, in characters.
pub const MAX_ID_LENGTH: usize = 128;

/// Validates the authenticated user's ID.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 128 characters
/// - Must not contain `/`
///
/// ## Example
/// ```rust
/// use ledger_core::validation::validate_user_id;
///
/// assert!(validate_user_id("uid-123").is_ok());
/// assert!(validate_user_id("").is_err());
/// assert!(validate_user_id("a/b").is_err());
/// ```
pub fn validate_user_id(user_id: &str) -> ValidationResult<()> {
    validate_path_segment("user_id", user_id)
}

/// Validates a caller-supplied document ID (e.g., a client ID).
///
/// Same rules as [`validate_user_id`].
pub fn validate_document_id(id: &str) -> ValidationResult<()> {
    validate_path_segment("document_id", id)
}

fn validate_path_segment(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LENGTH,
        });
    }

    if value.contains('/') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
