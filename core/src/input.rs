use crate::types::{PlayerId, SimTime, Vec2};
use serde::{Deserialize, Serialize};

/// Every input the core understands.
/// Transport envelopes (sequence numbers, auth) are stripped before this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum GameInput {
    PlayerMove {
        player_id: PlayerId,
        speed:     Vec2,
        /// Duration of movement at `speed`, in host time units.
        dt:        SimTime,
    },
    PlayerAttack {
        player_id: PlayerId,
        offset:    Vec2,
    },
    PlayerJoin {
        player_id: PlayerId,
        pos:       Vec2,
    },
    PlayerLeave {
        player_id: PlayerId,
    },
    TimePast {
        dt: SimTime,
    },
}

impl GameInput {
    /// Stable name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            GameInput::PlayerMove { .. }   => "PlayerMove",
            GameInput::PlayerAttack { .. } => "PlayerAttack",
            GameInput::PlayerJoin { .. }   => "PlayerJoin",
            GameInput::PlayerLeave { .. }  => "PlayerLeave",
            GameInput::TimePast { .. }     => "TimePast",
        }
    }
}
