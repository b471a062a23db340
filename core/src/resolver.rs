//! Arrow resolution, run after every TimePast once the clock has moved.
//!
//! For each landed arrow, in collection order:
//!   1. Hit test every player against the target position (squared distance).
//!   2. Hit players become dizzy until now + dizzy time (last hit wins).
//!   3. One Damage event per hit player, in player order.
//!   4. The arrow is gone.
//!
//! Landed and pending arrows are split up front with a stable partition,
//! so no arrow is skipped or seen twice however many land in one call.
//!
//! Collection order is firing order, oldest arrow first. A server that
//! scans its arrow list from the back emits the same hits with the
//! per-arrow groups reversed; final state is identical either way, only
//! cross-arrow event order differs.

use crate::{
    config::{GameConfig, SelfDamagePolicy},
    emitter::EventEmitter,
    event::GameEvent,
    state::{Arrow, GameState},
};

/// Resolve every arrow with `target_time <= state.now`.
/// Returns the events emitted, in emission order.
pub fn resolve_arrows(
    state: &mut GameState,
    config: &GameConfig,
    emitter: &mut EventEmitter,
) -> Vec<GameEvent> {
    let now = state.now;
    let (landed, pending): (Vec<Arrow>, Vec<Arrow>) = std::mem::take(&mut state.arrows)
        .into_iter()
        .partition(|a| a.has_landed(now));
    state.arrows = pending;

    let mut events = Vec::new();
    for arrow in &landed {
        resolve_one(state, config, emitter, arrow, &mut events);
    }

    if !landed.is_empty() {
        log::debug!(
            "now={now} resolved {} arrow(s), {} hit(s), {} still in flight",
            landed.len(),
            events.len(),
            state.arrows.len()
        );
    }
    events
}

fn resolve_one(
    state: &mut GameState,
    config: &GameConfig,
    emitter: &mut EventEmitter,
    arrow: &Arrow,
    events: &mut Vec<GameEvent>,
) {
    let radius_sq = config.attack_radius_sq();
    let dizzy_end = state.now + config.arrow_dizzy_time;

    for player in state.players.iter_mut() {
        if config.self_damage == SelfDamagePolicy::Exclude && player.id == arrow.from_player_id {
            continue;
        }
        if player.pos.distance_sq(arrow.target_pos) > radius_sq {
            continue;
        }

        player.dizzy_end_time = Some(dizzy_end);

        let event = GameEvent::Damage {
            from_player_id: arrow.from_player_id,
            to_player_id:   player.id,
        };
        log::debug!(
            "arrow {} from player {} hit player {}, dizzy until {dizzy_end}",
            arrow.id,
            arrow.from_player_id,
            player.id
        );
        emitter.emit(&event);
        events.push(event);
    }
}
