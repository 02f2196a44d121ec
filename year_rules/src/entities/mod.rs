//! Entity definitions for a storytelling session.

mod feature;
mod player;

pub use feature::*;
pub use player::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a running session.
///
/// Embeddings that accept writes from several clients serialize mutations per
/// session id; the engine itself never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
