//! Power-up effects and the scheduled-event queue
//!
//! Slow is undone by a queued revert instead of a wall-clock timer: the tick
//! fires due events against simulation time, so a revert happens exactly
//! once and replays identically. The queue is cleared when a round starts,
//! which cancels any revert left over from the previous round.

use rand::Rng;

use super::state::{GameEvent, GameState, PowerUpKind};
use crate::tuning::SlowActivation;

/// Deferred effect action
#[derive(Debug, Clone, PartialEq)]
pub enum EffectAction {
    /// Undo a slow: divide the velocity of these enemies by `factor`
    RevertSlow { enemy_ids: Vec<u32>, factor: f32 },
}

/// An action due at a point in round time
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub fire_at_ms: f64,
    pub action: EffectAction,
}

/// Pending actions, kept sorted by fire time (ties keep insertion order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectQueue {
    pending: Vec<ScheduledEvent>,
}

impl EffectQueue {
    pub fn schedule(&mut self, fire_at_ms: f64, action: EffectAction) {
        let idx = self.pending.partition_point(|e| e.fire_at_ms <= fire_at_ms);
        self.pending.insert(idx, ScheduledEvent { fire_at_ms, action });
    }

    /// Remove and return every event due at or before `now_ms`
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledEvent> {
        let split = self.pending.partition_point(|e| e.fire_at_ms <= now_ms);
        self.pending.drain(..split).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Remove one enemy chosen uniformly at random.
///
/// The set may end up empty; with no enemies this does nothing.
pub fn destroy_random_enemy(state: &mut GameState) -> Option<u32> {
    if state.enemies.is_empty() {
        return None;
    }
    let idx = state.rng.random_range(0..state.enemies.len());
    let enemy = state.enemies.remove(idx);
    state.events.push(GameEvent::EnemyDestroyed { id: enemy.id });
    log::debug!("Enemy {} destroyed ({} left)", enemy.id, state.enemies.len());
    Some(enemy.id)
}

/// Slow every live enemy and schedule the matching revert
pub fn apply_slow(state: &mut GameState) -> usize {
    let factor = state.tuning.effective_slow_factor();
    let mut enemy_ids = Vec::with_capacity(state.enemies.len());
    for enemy in &mut state.enemies {
        enemy.vel *= factor;
        enemy_ids.push(enemy.id);
    }
    let affected = enemy_ids.len();
    let fire_at_ms = state.elapsed_ms + state.tuning.slow_duration_ms;
    state
        .scheduled
        .schedule(fire_at_ms, EffectAction::RevertSlow { enemy_ids, factor });
    state.events.push(GameEvent::SlowApplied { affected });
    log::debug!("Slow applied to {} enemies until {:.0} ms", affected, fire_at_ms);
    affected
}

/// Spend one stored slow charge. Returns false when none are left.
pub fn use_slow_charge(state: &mut GameState) -> bool {
    if state.slow_charges == 0 {
        return false;
    }
    state.slow_charges -= 1;
    apply_slow(state);
    true
}

/// Apply a collected power-up
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    state.events.push(GameEvent::PowerUpCollected { kind });
    match kind {
        PowerUpKind::Destroy => {
            destroy_random_enemy(state);
        }
        PowerUpKind::Slow => match state.tuning.slow_activation {
            SlowActivation::Immediate => {
                apply_slow(state);
            }
            SlowActivation::Accumulate => {
                state.slow_charges += 1;
                state.events.push(GameEvent::SlowCharged {
                    charges: state.slow_charges,
                });
            }
        },
    }
}

/// Fire every scheduled action that is due
pub fn process_due(state: &mut GameState) {
    for event in state.scheduled.take_due(state.elapsed_ms) {
        match event.action {
            EffectAction::RevertSlow { enemy_ids, factor } => {
                let mut restored = 0;
                for enemy in state.enemies.iter_mut().filter(|e| enemy_ids.contains(&e.id)) {
                    enemy.vel /= factor;
                    restored += 1;
                }
                state.events.push(GameEvent::SlowReverted { restored });
                log::debug!("Slow reverted on {} enemies", restored);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with_enemies(n: u32, tuning: Tuning) -> GameState {
        let mut state = GameState::new(5, tuning, 0);
        for i in 0..n {
            let id = state.next_entity_id();
            let vel = Vec2::new(1.5 + i as f32 * 0.3, -2.25 - i as f32 * 0.1);
            state
                .enemies
                .push(Enemy::new(id, Vec2::new(100.0, 100.0), vel, 12.0));
        }
        state
    }

    #[test]
    fn test_queue_orders_by_fire_time() {
        let mut q = EffectQueue::default();
        let revert = |id| EffectAction::RevertSlow {
            enemy_ids: vec![id],
            factor: 0.5,
        };
        q.schedule(300.0, revert(3));
        q.schedule(100.0, revert(1));
        q.schedule(200.0, revert(2));
        let due = q.take_due(250.0);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].fire_at_ms, 100.0);
        assert_eq!(due[1].fire_at_ms, 200.0);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_destroy_removes_exactly_one() {
        let mut state = state_with_enemies(4, Tuning::default());
        let before: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        let removed = destroy_random_enemy(&mut state).expect("one removed");
        assert_eq!(state.enemies.len(), 3);
        assert!(before.contains(&removed));
        assert!(state.enemies.iter().all(|e| e.id != removed));
    }

    #[test]
    fn test_destroy_on_empty_is_noop() {
        let mut state = state_with_enemies(0, Tuning::default());
        assert_eq!(destroy_random_enemy(&mut state), None);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_destroy_last_enemy_empties_set() {
        let mut state = state_with_enemies(1, Tuning::default());
        destroy_random_enemy(&mut state);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_slow_round_trip_restores_velocity() {
        let tuning = Tuning {
            slow_factor: 0.3,
            ..Default::default()
        };
        let mut state = state_with_enemies(3, tuning);
        let before: Vec<Vec2> = state.enemies.iter().map(|e| e.vel).collect();

        apply_slow(&mut state);
        for (e, v) in state.enemies.iter().zip(&before) {
            assert!((e.vel - *v * 0.3).length() < 1e-5);
        }

        state.elapsed_ms = 4999.0;
        process_due(&mut state);
        assert_eq!(state.scheduled.len(), 1);

        state.elapsed_ms = 5000.0;
        process_due(&mut state);
        assert!(state.scheduled.is_empty());
        for (e, v) in state.enemies.iter().zip(&before) {
            assert!((e.vel - *v).length() < 1e-5);
        }
        assert!(state.events.contains(&GameEvent::SlowReverted { restored: 3 }));
    }

    #[test]
    fn test_revert_skips_late_spawns_and_tolerates_removals() {
        let mut state = state_with_enemies(2, Tuning::default());
        apply_slow(&mut state);
        state.enemies.remove(0);
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, Vec2::ZERO, Vec2::new(2.0, 2.0), 12.0));

        state.elapsed_ms = 10_000.0;
        process_due(&mut state);
        assert_eq!(state.enemies[1].vel, Vec2::new(2.0, 2.0));
        assert!(state.events.contains(&GameEvent::SlowReverted { restored: 1 }));
    }

    #[test]
    fn test_overlapping_slows_unwind_cleanly() {
        let mut state = state_with_enemies(1, Tuning::default());
        let original = state.enemies[0].vel;
        apply_slow(&mut state);
        state.elapsed_ms = 1000.0;
        apply_slow(&mut state);
        assert!((state.enemies[0].vel - original * 0.25).length() < 1e-6);
        state.elapsed_ms = 6000.0;
        process_due(&mut state);
        assert!((state.enemies[0].vel - original).length() < 1e-6);
    }

    #[test]
    fn test_slow_pickup_policies() {
        let mut stored = state_with_enemies(1, Tuning::default());
        let v = stored.enemies[0].vel;
        activate(&mut stored, PowerUpKind::Slow);
        assert_eq!(stored.slow_charges, 1);
        assert_eq!(stored.enemies[0].vel, v);
        assert!(use_slow_charge(&mut stored));
        assert!(!use_slow_charge(&mut stored));
        assert_eq!(stored.enemies[0].vel, v * 0.5);

        let mut instant = state_with_enemies(1, Tuning {
            slow_activation: SlowActivation::Immediate,
            ..Default::default()
        });
        activate(&mut instant, PowerUpKind::Slow);
        assert_eq!(instant.slow_charges, 0);
        assert_eq!(instant.enemies[0].vel, v * 0.5);
        assert_eq!(instant.scheduled.len(), 1);
    }
}
