//! Seeded input-script generation.
//!
//! Produces a plausible stream of arena inputs over a small pool of player
//! ids: joins and leaves, bursts of movement, attacks aimed near other
//! players, and time steps of varying length. The pool is small on purpose
//! so that unknown ids, duplicate joins and self-hits all show up.

use crate::{
    config::GameConfig,
    input::GameInput,
    rng::ScriptRng,
    types::{PlayerId, Vec2},
};
use serde::{Deserialize, Serialize};

/// Input mix, as cumulative thresholds over a [0, 1) roll.
const JOIN_P:   f64 = 0.10;
const LEAVE_P:  f64 = 0.14;
const MOVE_P:   f64 = 0.55;
const ATTACK_P: f64 = 0.75;
// Remainder: TimePast.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptParams {
    /// Player ids are drawn from 1..=max_player_id.
    pub max_player_id: PlayerId,
    /// Half-width of the square arena used for spawn points.
    pub arena_half_extent: f64,
    /// Largest per-input movement speed component.
    pub max_speed: f64,
    /// Largest PlayerMove dt.
    pub max_move_dt: f64,
    /// Largest attack offset component.
    pub max_attack_offset: f64,
    /// Largest TimePast dt.
    pub max_time_step: f64,
}

impl ScriptParams {
    /// Scale distances and times to a config so arrows actually land and hit.
    pub fn for_config(config: &GameConfig) -> Self {
        let r = config.arrow_attack_radius.max(1.0);
        Self {
            max_player_id:     6,
            arena_half_extent: r * 8.0,
            max_speed:         r,
            max_move_dt:       1.0,
            max_attack_offset: r * 4.0,
            max_time_step:     config.arrow_fly_time * 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub seed:   u64,
    pub inputs: Vec<GameInput>,
}

impl InputScript {
    pub fn generate(seed: u64, len: usize, params: &ScriptParams) -> Self {
        let mut rng = ScriptRng::new(seed, 0);
        let inputs = (0..len).map(|_| next_input(&mut rng, params)).collect();
        Self { seed, inputs }
    }
}

fn next_input(rng: &mut ScriptRng, params: &ScriptParams) -> GameInput {
    let player_id = 1 + rng.next_u64_below(u64::from(params.max_player_id.max(1))) as PlayerId;
    let roll = rng.next_f64();

    if roll < JOIN_P {
        let e = params.arena_half_extent;
        GameInput::PlayerJoin {
            player_id,
            pos: Vec2::new(rng.range_f64(-e, e), rng.range_f64(-e, e)),
        }
    } else if roll < LEAVE_P {
        GameInput::PlayerLeave { player_id }
    } else if roll < MOVE_P {
        let s = params.max_speed;
        GameInput::PlayerMove {
            player_id,
            speed: Vec2::new(rng.range_f64(-s, s), rng.range_f64(-s, s)),
            dt:    rng.range_f64(0.0, params.max_move_dt),
        }
    } else if roll < ATTACK_P {
        let o = params.max_attack_offset;
        // Occasionally aim at the attacker's own feet.
        let offset = if rng.chance(0.1) {
            Vec2::ZERO
        } else {
            Vec2::new(rng.range_f64(-o, o), rng.range_f64(-o, o))
        };
        GameInput::PlayerAttack { player_id, offset }
    } else {
        // Zero-length steps are legal and must still resolve landed arrows.
        let dt = if rng.chance(0.05) {
            0.0
        } else {
            rng.range_f64(0.0, params.max_time_step)
        };
        GameInput::TimePast { dt }
    }
}
