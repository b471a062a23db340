//! The state store: sole owner of the canonical GameState.
//!
//! RULE: only the engine mutates state. Everyone else gets a shared
//! borrow or an owned copy.

use crate::{error::SimResult, state::GameState};

#[derive(Debug, Clone, Default)]
pub struct StateStore {
    state: GameState,
}

impl StateStore {
    pub fn new(state: GameState) -> SimResult<Self> {
        state.check_invariants()?;
        Ok(Self { state })
    }

    /// Read-only view over the live state.
    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy, for hosts that need to let go of the borrow.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Discard the current state and adopt `new_state`.
    /// On an invalid state the current one is kept.
    pub fn replace(&mut self, new_state: GameState) -> SimResult<()> {
        new_state.check_invariants()?;
        log::info!(
            "State replaced: now={} players={} arrows={} next_arrow_id={}",
            new_state.now,
            new_state.players.len(),
            new_state.arrows.len(),
            new_state.next_arrow_id
        );
        self.state = new_state;
        Ok(())
    }

    /// Deep-copy a borrowed state into the store.
    pub fn replace_from(&mut self, new_state: &GameState) -> SimResult<()> {
        self.replace(new_state.clone())
    }

    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
