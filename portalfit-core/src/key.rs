//! Normalised join keys for players and teams.

use std::fmt;

use serde::Serialize;

/// Case-insensitive identifier used to join records across tables.
///
/// Keys are the trimmed, lowercased display name. Two different people who
/// share a name collapse onto one key; callers that have a stable identifier
/// should prefer it.
///
/// # Examples
/// ```
/// use portalfit_core::EntityKey;
///
/// assert_eq!(EntityKey::new("  Terrence Shannon Jr. "), EntityKey::new("terrence shannon jr."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    /// Normalise a display name into a key.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Borrow the normalised key text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Report whether the key is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
