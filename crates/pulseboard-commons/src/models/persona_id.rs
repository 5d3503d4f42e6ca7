//! Type-safe wrapper for persona identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for persona (profile) identifiers.
///
/// Persona ids are externally defined strings and are never validated
/// against a whitelist — the only boundary check is non-emptiness, which
/// happens in the ingestion service before this wrapper is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonaId(String);

impl PersonaId {
    /// Creates a new PersonaId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the persona id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonaId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PersonaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PersonaId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
