//! Rotation participants

use serde::{Deserialize, Serialize};

/// Emoji shown for a member who never picked one
pub const DEFAULT_EMOJI: &str = "👤";

/// Emoji shown for a paired speaking slot
pub const PAIR_EMOJI: &str = "👥";

/// A team member taking part in a spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub emoji: String,
}

impl Member {
    pub fn new(id: i64, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            emoji: emoji.into(),
        }
    }
}
