//! The game system: the single state owner and input dispatcher.
//!
//! RULES:
//!   - apply_input() is the only write entry point.
//!   - Inputs are applied one at a time, atomically, in caller order.
//!   - Unknown player ids are silent no-ops. Bad durations, and inputs
//!     that would leave a non-finite value in the state, are rejected
//!     before anything is touched.
//!   - No wall clock, no platform RNG, no hash-order iteration. The same
//!     state plus the same inputs gives the same state and events, always.

use crate::{
    config::{DuplicateJoinPolicy, GameConfig},
    emitter::{EventEmitter, SubscriptionId},
    error::{SimError, SimResult},
    event::GameEvent,
    input::GameInput,
    resolver,
    state::{Arrow, GameState, Player},
    store::StateStore,
    types::{PlayerId, SimTime, Vec2},
};

/// What one input did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOutcome {
    /// False when the input was a no-op (unknown player, dizzy mover,
    /// rejected duplicate join).
    pub applied: bool,
    /// Events emitted while applying the input, in emission order.
    pub events:  Vec<GameEvent>,
}

impl InputOutcome {
    fn applied() -> Self {
        Self { applied: true, events: Vec::new() }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
pub struct GameSystem {
    config:  GameConfig,
    store:   StateStore,
    emitter: EventEmitter,
}

impl GameSystem {
    /// Build an engine over the empty state.
    pub fn new(config: GameConfig) -> SimResult<Self> {
        Self::with_state(config, GameState::default())
    }

    /// Build an engine over an existing state (e.g. a server snapshot).
    pub fn with_state(config: GameConfig, state: GameState) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store: StateStore::new(state)?,
            emitter: EventEmitter::new(),
        })
    }

    /// Engine over GameConfig::default_test(). Used by tests and tooling.
    pub fn build_test() -> SimResult<Self> {
        Self::new(GameConfig::default_test())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Render-pull view of the canonical state.
    pub fn state(&self) -> &GameState {
        self.store.current_state()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Resync: force the engine onto a provided snapshot.
    pub fn reset(&mut self, state: GameState) -> SimResult<()> {
        self.store.replace(state)
    }

    pub fn on_damage<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.emitter.on_damage(observer)
    }

    pub fn unregister(&mut self, id: SubscriptionId) -> bool {
        self.emitter.unregister(id)
    }

    /// Apply one input to the canonical state.
    pub fn apply_input(&mut self, input: &GameInput) -> SimResult<InputOutcome> {
        let outcome = match *input {
            GameInput::PlayerMove { player_id, speed, dt } => {
                check_duration(input, dt)?;
                check_vec(input, "speed", speed)?;
                self.player_move(input, player_id, speed, dt)?
            }
            GameInput::PlayerAttack { player_id, offset } => {
                check_vec(input, "offset", offset)?;
                self.player_attack(input, player_id, offset)?
            }
            GameInput::PlayerJoin { player_id, pos } => {
                check_vec(input, "pos", pos)?;
                self.player_join(player_id, pos)
            }
            GameInput::PlayerLeave { player_id } => self.player_leave(player_id),
            GameInput::TimePast { dt } => {
                check_duration(input, dt)?;
                self.time_past(input, dt)?
            }
        };

        if !outcome.applied {
            log::debug!("now={} ignored {:?}", self.state().now, input);
        }
        Ok(outcome)
    }

    /// Apply inputs in order, stopping at the first rejected one.
    pub fn apply_inputs<'a, I>(&mut self, inputs: I) -> SimResult<Vec<GameEvent>>
    where
        I: IntoIterator<Item = &'a GameInput>,
    {
        let mut events = Vec::new();
        for input in inputs {
            events.extend(self.apply_input(input)?.events);
        }
        Ok(events)
    }

    fn player_move(
        &mut self,
        input: &GameInput,
        player_id: PlayerId,
        speed: Vec2,
        dt: SimTime,
    ) -> SimResult<InputOutcome> {
        let state = self.store.state_mut();
        let now = state.now;
        let Some(player) = state.player_mut(player_id) else {
            return Ok(InputOutcome::ignored());
        };
        if player.is_dizzy(now) {
            return Ok(InputOutcome::ignored());
        }
        let pos = player.pos + speed * dt;
        if !pos.is_finite() {
            return Err(reject(input, format!("player {player_id} would move out of range")));
        }
        player.pos = pos;
        Ok(InputOutcome::applied())
    }

    fn player_attack(
        &mut self,
        input: &GameInput,
        player_id: PlayerId,
        offset: Vec2,
    ) -> SimResult<InputOutcome> {
        let fly_time = self.config.arrow_fly_time;
        let state = self.store.state_mut();
        let Some(pos) = state.player(player_id).map(|p| p.pos) else {
            return Ok(InputOutcome::ignored());
        };

        let target_pos = pos + offset;
        if !target_pos.is_finite() {
            return Err(reject(input, format!("player {player_id} aimed out of range")));
        }
        // At a large enough clock, now + fly_time rounds back to now.
        let target_time = state.now + fly_time;
        if !(target_time.is_finite() && target_time > state.now) {
            return Err(reject(input, format!("arrow would not land after now={}", state.now)));
        }

        let id = state.next_arrow_id;
        state.next_arrow_id += 1;
        state.arrows.push(Arrow {
            id,
            from_player_id: player_id,
            start_pos:      pos,
            start_time:     state.now,
            target_pos,
            target_time,
        });
        log::debug!("now={} player {player_id} fired arrow {id}", state.now);
        Ok(InputOutcome::applied())
    }

    fn player_join(&mut self, player_id: PlayerId, pos: Vec2) -> InputOutcome {
        let policy = self.config.duplicate_join;
        let state = self.store.state_mut();
        match state.players.iter().position(|p| p.id == player_id) {
            Some(_) if policy == DuplicateJoinPolicy::Reject => {
                log::warn!("player {player_id} joined twice, keeping the existing player");
                InputOutcome::ignored()
            }
            Some(idx) => {
                state.players[idx] = Player::new(player_id, pos);
                InputOutcome::applied()
            }
            None => {
                state.players.push(Player::new(player_id, pos));
                log::debug!("player {player_id} joined at ({}, {})", pos.x, pos.y);
                InputOutcome::applied()
            }
        }
    }

    fn player_leave(&mut self, player_id: PlayerId) -> InputOutcome {
        let players = &mut self.store.state_mut().players;
        let before = players.len();
        players.retain(|p| p.id != player_id);
        if players.len() == before {
            return InputOutcome::ignored();
        }
        log::debug!("player {player_id} left");
        InputOutcome::applied()
    }

    fn time_past(&mut self, input: &GameInput, dt: SimTime) -> SimResult<InputOutcome> {
        let state = self.store.state_mut();
        let now = state.now + dt;
        if !(now + self.config.arrow_dizzy_time).is_finite() {
            return Err(reject(input, format!("clock would overflow from now={}", state.now)));
        }
        state.now = now;
        let events = resolver::resolve_arrows(state, &self.config, &mut self.emitter);
        Ok(InputOutcome { applied: true, events })
    }
}

/// Durations must be finite and non-negative; anything else would move
/// the clock backwards or poison it.
fn check_duration(input: &GameInput, dt: SimTime) -> SimResult<()> {
    if dt.is_finite() && dt >= 0.0 {
        return Ok(());
    }
    log::warn!("rejected {} with dt={dt}", input.kind());
    Err(SimError::InvalidDuration { input: input.kind(), dt })
}

fn check_vec(input: &GameInput, field: &str, v: Vec2) -> SimResult<()> {
    if v.is_finite() {
        return Ok(());
    }
    Err(reject(input, format!("{field} ({}, {}) is not finite", v.x, v.y)))
}

/// The input would leave a non-finite or out-of-order value in the state.
fn reject(input: &GameInput, reason: String) -> SimError {
    log::warn!("rejected {}: {reason}", input.kind());
    SimError::InvalidInput { input: input.kind(), reason }
}
