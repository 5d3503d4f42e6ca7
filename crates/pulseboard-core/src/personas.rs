//! Static display metadata for personas.
//!
//! The directory is loaded once at startup from configuration and
//! injected into the query service; it is never stored and never changes
//! at runtime. Unknown ids get a deterministic placeholder so the front
//! end always has something to render.

use pulseboard_commons::PersonaId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display metadata for one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaMeta {
    /// Human-readable label shown on the dashboard.
    pub label: String,
    /// Emoji/icon reference.
    pub emoji: String,
}

/// Fixed id → display-metadata table.
pub struct PersonaDirectory {
    entries: HashMap<String, PersonaMeta>,
}

impl PersonaDirectory {
    pub fn new(entries: HashMap<String, PersonaMeta>) -> Self {
        Self { entries }
    }

    /// An empty directory; every lookup falls back to the placeholder.
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Metadata for `id`, falling back to a placeholder derived from the
    /// id itself (capitalized id, generic icon) for unknown personas.
    pub fn lookup(&self, id: &PersonaId) -> PersonaMeta {
        self.entries
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| placeholder(id.as_str()))
    }
}

fn placeholder(id: &str) -> PersonaMeta {
    let mut chars = id.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => "Unknown".to_string(),
    };
    PersonaMeta {
        label,
        emoji: "👤".to_string(),
    }
}
