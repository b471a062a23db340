//! Game events pushed to observers during resolution.

use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Every event the core can emit.
/// Variants are appended only, never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum GameEvent {
    Damage {
        from_player_id: PlayerId,
        to_player_id:   PlayerId,
    },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Damage { .. } => EventKind::Damage,
        }
    }
}

/// Observer registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Damage,
}
