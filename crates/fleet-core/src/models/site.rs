//! Site entity and the lightweight back-reference held by environments.

use serde::{Deserialize, Serialize};

/// A hosted site. Owned and mutated by the platform; the core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    /// Set when the site is in a read-only/archived state. The platform
    /// reports either a truthy value or omits the field entirely.
    #[serde(default)]
    pub frozen: Option<bool>,
}

impl Site {
    /// Frozen sites hide `test` and `live` from serialized environment
    /// listings (they stay visible to filters).
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    pub fn to_ref(&self) -> SiteRef {
        SiteRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Non-owning back-reference from an environment to its site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRef {
    pub id: String,
    pub name: String,
}
