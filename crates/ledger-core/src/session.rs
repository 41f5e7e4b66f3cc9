//! # Session
//!
//! The authenticated user a repository call acts for.
//!
//! Every repository method takes `&Session` explicitly; nothing reads a
//! "current user" from global state. The session only knows where the user's
//! data lives:
//!
//! ```text
//! usuarios/{user_id}                 ← root document
//! usuarios/{user_id}/ventas          ← collection(SALES_COLLECTION)
//! usuarios/{user_id}/transacciones   ← collection(TRANSACTIONS_COLLECTION)
//! ```
//!
//! Authenticating the user is the caller's job.

use crate::document::CollectionPath;
use crate::error::ValidationError;
use crate::validation::validate_user_id;
use crate::USERS_COLLECTION;

/// An authenticated user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    /// Creates a session for a user ID.
    ///
    /// ## Errors
    /// Returns a [`ValidationError`] if the ID is empty, too long, or
    /// contains `/`.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::Session;
    ///
    /// let session = Session::new("uid-1").unwrap();
    /// assert_eq!(session.root_path(), "usuarios/uid-1");
    /// ```
    pub fn new(user_id: impl Into<String>) -> Result<Self, ValidationError> {
        let user_id = user_id.into();
        validate_user_id(&user_id)?;
        Ok(Session { user_id })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Path of the user's root document.
    pub fn root_path(&self) -> String {
        format!("{}/{}", USERS_COLLECTION, self.user_id)
    }

    /// A collection nested under the user's root document.
    pub fn collection(&self, name: &str) -> CollectionPath {
        CollectionPath::new(self.root_path(), name)
    }
}
