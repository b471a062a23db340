//! Replay of input sequences against a starting state.
//!
//! Server and client run the same inputs through the same rules; this is
//! where that contract is checked.

use crate::{
    config::GameConfig,
    engine::GameSystem,
    error::{SimError, SimResult},
    event::GameEvent,
    input::GameInput,
    state::GameState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub state:    GameState,
    pub events:   Vec<GameEvent>,
    /// Inputs that were no-ops (unknown player, dizzy mover, duplicate join).
    pub ignored:  usize,
    /// Inputs rejected as invalid parameters. Replay continues past them.
    pub rejected: usize,
}

/// Run `inputs` on a fresh engine starting from a copy of `initial`.
pub fn replay(
    config: &GameConfig,
    initial: &GameState,
    inputs: &[GameInput],
) -> SimResult<ReplayOutcome> {
    let mut engine = GameSystem::with_state(config.clone(), initial.clone())?;
    let mut events = Vec::new();
    let mut ignored = 0;
    let mut rejected = 0;

    for input in inputs {
        match engine.apply_input(input) {
            Ok(outcome) => {
                if !outcome.applied {
                    ignored += 1;
                }
                events.extend(outcome.events);
            }
            Err(e) if e.is_rejected_input() => rejected += 1,
            Err(e) => return Err(e),
        }
    }

    Ok(ReplayOutcome {
        state: engine.store().snapshot(),
        events,
        ignored,
        rejected,
    })
}

/// Run `inputs` on two independent engines in lockstep and fail at the
/// first input after which their serialized states or emitted events differ.
pub fn verify_determinism(
    config: &GameConfig,
    initial: &GameState,
    inputs: &[GameInput],
) -> SimResult<ReplayOutcome> {
    let mut engine_a = GameSystem::with_state(config.clone(), initial.clone())?;
    let mut engine_b = GameSystem::with_state(config.clone(), initial.clone())?;
    let mut events = Vec::new();
    let mut ignored = 0;
    let mut rejected = 0;

    for (input_index, input) in inputs.iter().enumerate() {
        let a = engine_a.apply_input(input);
        let b = engine_b.apply_input(input);

        match (a, b) {
            (Ok(a), Ok(b)) => {
                if a != b {
                    return Err(SimError::DeterminismViolation { input_index });
                }
                if !a.applied {
                    ignored += 1;
                }
                events.extend(a.events);
            }
            (Err(a), Err(b)) if a.is_rejected_input() && b.is_rejected_input() => {
                if a.to_string() != b.to_string() {
                    return Err(SimError::DeterminismViolation { input_index });
                }
                rejected += 1;
            }
            (Err(e), _) | (_, Err(e)) => {
                if e.is_rejected_input() {
                    return Err(SimError::DeterminismViolation { input_index });
                }
                return Err(e);
            }
        }

        let json_a = serde_json::to_string(engine_a.state())?;
        let json_b = serde_json::to_string(engine_b.state())?;
        if json_a != json_b {
            log::warn!("replay diverged after input {input_index}:\n  A: {json_a}\n  B: {json_b}");
            return Err(SimError::DeterminismViolation { input_index });
        }
    }

    Ok(ReplayOutcome {
        state: engine_a.store().snapshot(),
        events,
        ignored,
        rejected,
    })
}
