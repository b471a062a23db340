//! Shared helpers for the integration tests.
//!
//! Log output goes through the test harness; run with RUST_LOG=debug to see
//! the engine's and resolver's per-input lines next to a failing test.

#![allow(dead_code)]

use arena_core::{engine::GameSystem, GameConfig};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Engine over GameConfig::default_test(), with logging wired up.
pub fn test_engine() -> GameSystem {
    engine_with(GameConfig::default_test())
}

pub fn engine_with(config: GameConfig) -> GameSystem {
    init_logging();
    GameSystem::new(config).expect("build test engine")
}
