//! Canonical game state: players, in-flight arrows, and the clock.
//!
//! Field names serialize in camelCase to match the client-side
//! representation, so snapshots can be shipped verbatim by a transport layer.

use crate::{
    error::{SimError, SimResult},
    types::{ArrowId, PlayerId, SimTime, Vec2},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id:  PlayerId,
    pub pos: Vec2,
    /// Unset means the player is not dizzy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dizzy_end_time: Option<SimTime>,
}

impl Player {
    pub fn new(id: PlayerId, pos: Vec2) -> Self {
        Self { id, pos, dizzy_end_time: None }
    }

    /// Dizzy players cannot move.
    pub fn is_dizzy(&self, now: SimTime) -> bool {
        matches!(self.dizzy_end_time, Some(end) if end > now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id:             ArrowId,
    /// May name a player that has since left.
    pub from_player_id: PlayerId,
    pub start_pos:      Vec2,
    pub start_time:     SimTime,
    pub target_pos:     Vec2,
    pub target_time:    SimTime,
}

impl Arrow {
    pub fn has_landed(&self, now: SimTime) -> bool {
        self.target_time <= now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub now:           SimTime,
    pub players:       Vec<Player>,
    pub arrows:        Vec<Arrow>,
    pub next_arrow_id: ArrowId,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            now:           0.0,
            players:       Vec::new(),
            arrows:        Vec::new(),
            next_arrow_id: 1,
        }
    }
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn arrow(&self, id: ArrowId) -> Option<&Arrow> {
        self.arrows.iter().find(|a| a.id == id)
    }

    /// Check the structural invariants a state must hold before the engine
    /// will adopt it: finite clock and positions, finite arrow and dizzy
    /// times, distinct player ids, distinct arrow ids below the id counter.
    pub fn check_invariants(&self) -> SimResult<()> {
        if !self.now.is_finite() || self.now < 0.0 {
            return Err(invalid(format!("now must be finite and >= 0, got {}", self.now)));
        }
        if self.next_arrow_id == 0 {
            return Err(invalid("next_arrow_id must start at 1".into()));
        }

        let mut player_ids = BTreeSet::new();
        for p in &self.players {
            if !player_ids.insert(p.id) {
                return Err(invalid(format!("duplicate player id {}", p.id)));
            }
            if !p.pos.is_finite() {
                return Err(invalid(format!("player {} has a non-finite position", p.id)));
            }
            if matches!(p.dizzy_end_time, Some(t) if !t.is_finite()) {
                return Err(invalid(format!("player {} has a non-finite dizzy end time", p.id)));
            }
        }

        let mut arrow_ids = BTreeSet::new();
        for a in &self.arrows {
            if !arrow_ids.insert(a.id) {
                return Err(invalid(format!("duplicate arrow id {}", a.id)));
            }
            if a.id >= self.next_arrow_id {
                return Err(invalid(format!(
                    "arrow id {} is not below next_arrow_id {}",
                    a.id, self.next_arrow_id
                )));
            }
            if !(a.start_pos.is_finite() && a.target_pos.is_finite()) {
                return Err(invalid(format!("arrow {} has a non-finite position", a.id)));
            }
            if !(a.start_time.is_finite() && a.target_time.is_finite()) {
                return Err(invalid(format!("arrow {} has a non-finite time", a.id)));
            }
            if a.target_time <= a.start_time {
                return Err(invalid(format!("arrow {} lands before it is fired", a.id)));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> SimError {
    SimError::InvalidState { reason }
}
