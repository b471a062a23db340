//! Arrow resolution tests: landing, hit radius, dizzy, ordering.
//!
//! Arrows landing in the same TimePast resolve oldest first, so their
//! Damage events come out in firing order (not in reverse-scan order).
//!
//! Self-damage policy: the default is SelfDamagePolicy::Include, i.e. an
//! arrow landing on its own shooter hits the shooter. Exclude is opt-in.

mod support;

use arena_core::{
    event::GameEvent,
    input::GameInput,
    GameConfig, SelfDamagePolicy, Vec2,
};

fn join(id: u32, x: f64, y: f64) -> GameInput {
    GameInput::PlayerJoin { player_id: id, pos: Vec2::new(x, y) }
}

fn attack(id: u32, ox: f64, oy: f64) -> GameInput {
    GameInput::PlayerAttack { player_id: id, offset: Vec2::new(ox, oy) }
}

fn pass(dt: f64) -> GameInput {
    GameInput::TimePast { dt }
}

fn damage(from: u32, to: u32) -> GameEvent {
    GameEvent::Damage { from_player_id: from, to_player_id: to }
}

/// Join two players 10 apart, shoot from one at the other, wait out the flight.
#[test]
fn arrow_lands_on_target_after_flight_time() {
    let mut engine = support::test_engine();
    let fly = engine.config().arrow_fly_time;
    let dizzy = engine.config().arrow_dizzy_time;

    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 10.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 10.0, 0.0)).unwrap();

    let arrow = engine.state().arrow(1).expect("arrow 1 in flight");
    assert_eq!(arrow.target_pos, Vec2::new(10.0, 0.0));
    assert_eq!(arrow.start_time, 0.0);
    assert_eq!(arrow.target_time, fly);

    let outcome = engine.apply_input(&pass(fly)).unwrap();

    let state = engine.state();
    assert!(state.arrows.is_empty(), "Arrow 1 should be resolved and removed");
    assert_eq!(state.player(2).unwrap().dizzy_end_time, Some(fly + dizzy));
    assert_eq!(state.player(1).unwrap().dizzy_end_time, None);
    assert_eq!(outcome.events, vec![damage(1, 2)]);
}

#[test]
fn arrow_in_flight_does_nothing_before_target_time() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 3.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 3.0, 0.0)).unwrap();

    let outcome = engine.apply_input(&pass(0.5)).unwrap();
    assert!(outcome.events.is_empty());
    assert_eq!(engine.state().arrows.len(), 1);
    assert_eq!(engine.state().player(2).unwrap().dizzy_end_time, None);

    let outcome = engine.apply_input(&pass(0.5)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 2)]);
    assert!(engine.state().arrows.is_empty());
}

#[test]
fn hit_radius_is_inclusive() {
    // Radius 2.0: players exactly 2 away are hit, one just beyond is not.
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 10.0, 2.0)).unwrap();
    engine.apply_input(&join(3, 10.0, -2.001)).unwrap();
    engine.apply_input(&join(4, 8.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 10.0, 0.0)).unwrap();

    let outcome = engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 2), damage(1, 4)]);
    assert_eq!(engine.state().player(3).unwrap().dizzy_end_time, None);
}

#[test]
fn hits_follow_player_collection_order() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(7, 5.0, 0.0)).unwrap();
    engine.apply_input(&join(3, 5.5, 0.0)).unwrap();
    engine.apply_input(&join(5, 4.5, 0.0)).unwrap();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 5.0, 0.0)).unwrap();

    let outcome = engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 7), damage(1, 3), damage(1, 5)]);
}

/// Default policy: the shooter is a valid target of its own arrow.
#[test]
fn self_damage_is_included_by_default() {
    let mut engine = support::test_engine();
    assert_eq!(engine.config().self_damage, SelfDamagePolicy::Include);

    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 1.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 0.0, 0.0)).unwrap();

    let outcome = engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 1), damage(1, 2)]);
    assert!(engine.state().player(1).unwrap().dizzy_end_time.is_some());
}

#[test]
fn self_damage_exclude_policy_spares_the_shooter() {
    let config = GameConfig::default_test().with_self_damage(SelfDamagePolicy::Exclude);
    let mut engine = support::engine_with(config);

    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 1.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 0.0, 0.0)).unwrap();

    let outcome = engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 2)]);
    assert_eq!(engine.state().player(1).unwrap().dizzy_end_time, None);
}

#[test]
fn later_hit_overwrites_dizzy_end_time() {
    let mut engine = support::test_engine();
    let dizzy = engine.config().arrow_dizzy_time;

    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 10.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 10.0, 0.0)).unwrap();
    engine.apply_input(&pass(0.5)).unwrap();
    engine.apply_input(&attack(1, 10.0, 0.0)).unwrap();

    engine.apply_input(&pass(0.5)).unwrap(); // now = 1.0, arrow 1 lands
    assert_eq!(engine.state().player(2).unwrap().dizzy_end_time, Some(1.0 + dizzy));

    engine.apply_input(&pass(0.5)).unwrap(); // now = 1.5, arrow 2 lands
    assert_eq!(engine.state().player(2).unwrap().dizzy_end_time, Some(1.5 + dizzy));
}

#[test]
fn hit_on_dizzy_player_can_shorten_remaining_dizzy() {
    // No max: the latest resolution wins even when it ends sooner.
    let config = GameConfig { arrow_dizzy_time: 2.0, ..GameConfig::default_test() };
    let mut engine = support::engine_with(config);
    let mut state = arena_core::GameState::default();
    state.players.push(arena_core::Player { id: 2, pos: Vec2::ZERO, dizzy_end_time: Some(50.0) });
    state.players.push(arena_core::Player::new(1, Vec2::new(-5.0, 0.0)));
    engine.reset(state).unwrap();

    engine.apply_input(&attack(1, 5.0, 0.0)).unwrap();
    engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(engine.state().player(2).unwrap().dizzy_end_time, Some(3.0));
}

#[test]
fn several_landed_arrows_resolve_in_one_pass_in_collection_order() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 20.0, 0.0)).unwrap();
    engine.apply_input(&join(3, 40.0, 0.0)).unwrap();

    engine.apply_input(&attack(2, 20.0, 0.0)).unwrap(); // arrow 1 → player 3
    engine.apply_input(&attack(3, -40.0, 0.0)).unwrap(); // arrow 2 → player 1
    engine.apply_input(&pass(0.25)).unwrap();
    engine.apply_input(&attack(1, 20.0, 0.0)).unwrap(); // arrow 3 → player 2

    // One long step lands all three at once: events follow firing order.
    let outcome = engine.apply_input(&pass(5.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(2, 3), damage(3, 1), damage(1, 2)]);
    assert!(engine.state().arrows.is_empty());
}

#[test]
fn only_landed_arrows_are_removed() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 100.0, 0.0)).unwrap(); // lands at 1.0
    engine.apply_input(&pass(0.5)).unwrap();
    engine.apply_input(&attack(1, 100.0, 0.0)).unwrap(); // lands at 1.5
    engine.apply_input(&pass(0.25)).unwrap();
    engine.apply_input(&attack(1, 100.0, 0.0)).unwrap(); // lands at 1.75

    engine.apply_input(&pass(0.75)).unwrap(); // now = 1.5
    let remaining: Vec<u64> = engine.state().arrows.iter().map(|a| a.id).collect();
    assert_eq!(remaining, vec![3]);
}

#[test]
fn zero_time_step_still_resolves_due_arrows() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 1.0, 0.0)).unwrap();

    let mut state = engine.store().snapshot();
    state.arrows.push(arena_core::Arrow {
        id: 1,
        from_player_id: 1,
        start_pos: Vec2::ZERO,
        start_time: -1.0,
        target_pos: Vec2::new(1.0, 0.0),
        target_time: 0.0,
    });
    state.next_arrow_id = 2;
    engine.reset(state).unwrap();

    let outcome = engine.apply_input(&pass(0.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 1), damage(1, 2)]);
    assert!(engine.state().arrows.is_empty());
}

#[test]
fn arrow_from_departed_player_still_lands() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 4.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 4.0, 0.0)).unwrap();
    engine.apply_input(&GameInput::PlayerLeave { player_id: 1 }).unwrap();

    let outcome = engine.apply_input(&pass(1.0)).unwrap();
    assert_eq!(outcome.events, vec![damage(1, 2)]);
}

#[test]
fn arrow_landing_on_empty_ground_is_silently_removed() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 50.0, 50.0)).unwrap();

    let outcome = engine.apply_input(&pass(2.0)).unwrap();
    assert!(outcome.events.is_empty());
    assert!(engine.state().arrows.is_empty());
    assert_eq!(engine.state().next_arrow_id, 2, "Ids are never reused");
}

#[test]
fn hit_player_cannot_move_until_dizzy_ends() {
    let mut engine = support::test_engine();
    engine.apply_input(&join(1, 0.0, 0.0)).unwrap();
    engine.apply_input(&join(2, 10.0, 0.0)).unwrap();
    engine.apply_input(&attack(1, 10.0, 0.0)).unwrap();
    engine.apply_input(&pass(1.0)).unwrap(); // dizzy until 3.0

    let step = GameInput::PlayerMove { player_id: 2, speed: Vec2::new(1.0, 0.0), dt: 1.0 };
    assert!(!engine.apply_input(&step).unwrap().applied);
    engine.apply_input(&pass(1.5)).unwrap();
    assert!(!engine.apply_input(&step).unwrap().applied);
    engine.apply_input(&pass(0.5)).unwrap();
    assert!(engine.apply_input(&step).unwrap().applied);
    assert_eq!(engine.state().player(2).unwrap().pos, Vec2::new(11.0, 0.0));
}
