//! Holders are the economic actors of the system: anything that owns an
//! abstract balance and zero or more physical containers. The core never
//! stores holders itself; it only references them by ID when talking to the
//! external balance store and container provider.

use serde::{Deserialize, Serialize};

/// Identifies a holder (a player or account identity) within the economy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderID(String);

impl HolderID {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    /// Return a string ref for this ID
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Create a new random ID
    #[cfg(test)]
    pub(crate) fn create() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl From<HolderID> for String {
    fn from(val: HolderID) -> Self {
        let HolderID(inner) = val;
        inner
    }
}

impl From<String> for HolderID {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for HolderID {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
