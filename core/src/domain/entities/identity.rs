//! Identity entity owned by the external user store.

use serde::{Deserialize, Serialize};

/// Opaque reference to a registered user
///
/// The user store assigns `id`; the core only reads it and embeds it in the
/// access token claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier assigned by the user store
    pub id: String,

    /// Unique email address, also used as the token subject
    pub email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
