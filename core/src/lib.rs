//! arena-core: the deterministic simulation core of a small arena game.
//!
//! Players join, move, and fire arrows that land after a fixed flight
//! time, leaving everyone near the impact point dizzy for a while.
//! [`engine::GameSystem`] owns the canonical [`state::GameState`] and is the
//! only thing that mutates it; all changes arrive as [`input::GameInput`]s.
//!
//! Modules:
//! - [`engine`] dispatches inputs and owns the state store and emitter
//! - [`resolver`] lands arrows after each TimePast
//! - [`store`] holds the canonical state (read-only view, full replace)
//! - [`emitter`] and [`event`] push damage notifications to observers
//! - [`replay`] re-runs input sequences and checks determinism
//! - [`rng`] and [`script`] generate seeded input scripts for soak runs

pub mod config;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod replay;
pub mod resolver;
pub mod rng;
pub mod script;
pub mod state;
pub mod store;
pub mod types;

pub use config::{DuplicateJoinPolicy, GameConfig, SelfDamagePolicy};
pub use engine::{GameSystem, InputOutcome};
pub use error::{SimError, SimResult};
pub use event::GameEvent;
pub use input::GameInput;
pub use state::{Arrow, GameState, Player};
pub use types::Vec2;
