use bounce_dodge::consts::TICK_MS;
use bounce_dodge::persistence::{BestTimeStore, MemoryStore};
use bounce_dodge::sim::spawn::aimed_velocity;
use bounce_dodge::sim::{
    Enemy, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind, TickInput, tick,
};
use bounce_dodge::{ControlScheme, Tuning};
use glam::Vec2;

/// Player parked by the keys scheme, no random power-ups
fn quiet_tuning() -> Tuning {
    Tuning {
        control: ControlScheme::Keys,
        power_up_chance: 0.0,
        ..Default::default()
    }
}

fn started(seed: u64, tuning: Tuning, best: u64) -> GameState {
    let mut state = GameState::new(seed, tuning, best);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, TICK_MS);
    assert_eq!(state.phase, GamePhase::Playing);
    state.drain_events();
    state
}

fn add_enemy(state: &mut GameState, pos: Vec2, vel: Vec2) -> u32 {
    let id = state.next_entity_id();
    let radius = state.tuning.enemy_radius;
    state.enemies.push(Enemy::new(id, pos, vel, radius));
    id
}

#[test]
fn test_aimed_enemy_drifts_inward() {
    let mut state = started(11, quiet_tuning(), 0);
    state.enemies.clear();
    state.player.pos = Vec2::new(400.0, 80.0);

    let from = Vec2::new(-20.0, 300.0);
    let vel = aimed_velocity(from, Vec2::new(400.0, 300.0), 2.0);
    add_enemy(&mut state, from, vel);

    let input = TickInput::default();
    let mut last_x = f32::NEG_INFINITY;
    for _ in 0..150 {
        tick(&mut state, &input, TICK_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        let enemy = &state.enemies[0];
        assert!(enemy.pos.x > last_x, "x went from {} to {}", last_x, enemy.pos.x);
        assert!(enemy.pos.x <= 400.0);
        assert_eq!(enemy.pos.y, 300.0);
        last_x = enemy.pos.x;
    }
    assert!(!state.drain_events().contains(&GameEvent::EnemyBounced));
}

#[test]
fn test_collision_on_first_tick_scores_zero() {
    for previous_best in [0u64, 7] {
        let mut state = started(3, quiet_tuning(), previous_best);
        let at_player = state.player.pos;
        add_enemy(&mut state, at_player, Vec2::new(1.0, 1.0));

        tick(&mut state, &TickInput::default(), TICK_MS);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.last_score, Some(0));
        assert_eq!(state.best_secs, previous_best);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::GameOver { seconds: 0 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewRecord { .. })));
    }
}

#[test]
fn test_destroying_the_only_enemy_leaves_arena_empty() {
    let mut state = started(5, quiet_tuning(), 0);
    assert_eq!(state.enemies.len(), 1);
    state.enemies[0].pos = Vec2::new(700.0, 500.0);

    let id = state.next_entity_id();
    let radius = state.tuning.power_up_radius;
    let lifetime = state.tuning.power_up_lifetime_ms;
    state.power_ups.push(PowerUp::new(
        id,
        PowerUpKind::Destroy,
        state.player.pos,
        radius,
        lifetime,
    ));

    tick(&mut state, &TickInput::default(), TICK_MS);
    assert!(state.enemies.is_empty());
    assert!(state.power_ups.is_empty());

    // Nothing to hit until the next timed spawn
    for _ in 0..100 {
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert_eq!(state.phase, GamePhase::Playing);
    }
    assert!(state.enemies.is_empty());
}

#[test]
fn test_best_time_never_decreases_across_rounds() {
    let mut store = MemoryStore::with_raw("4");
    let mut state = GameState::new(21, quiet_tuning(), store.get_best_time());
    assert_eq!(state.best_secs, 4);

    let mut previous_best = state.best_secs;
    for survive_ms in [2_500.0, 6_200.0, 1_000.0, 6_999.0, 9_000.0] {
        state.start_round();
        state.elapsed_ms = survive_ms;
        let result = state.end_round().expect("round in progress");

        for event in state.drain_events() {
            if let GameEvent::NewRecord { seconds } = event {
                store.set_best_time(seconds).expect("memory store");
            }
        }

        let expected = previous_best.max((survive_ms / 1000.0) as u64);
        assert_eq!(state.best_secs, expected);
        assert_eq!(result.new_record, expected > previous_best);
        assert_eq!(store.get_best_time(), expected);
        previous_best = expected;
    }
    assert_eq!(store.get_best_time(), 9);
}

#[test]
fn test_same_seed_same_round() {
    let run = |seed| {
        let mut state = started(seed, Tuning::default(), 0);
        let input = TickInput {
            pointer: Some(Vec2::new(120.0, 480.0)),
            ..Default::default()
        };
        for _ in 0..2_000 {
            tick(&mut state, &input, TICK_MS);
        }
        (
            state.phase,
            state.elapsed_ms,
            state.enemies.iter().map(|e| (e.id, e.pos, e.vel)).collect::<Vec<_>>(),
            state.power_ups.iter().map(|p| (p.id, p.pos)).collect::<Vec<_>>(),
        )
    };
    assert_eq!(run(99), run(99));
}
