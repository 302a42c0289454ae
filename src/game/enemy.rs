//! Enemy pursuit logic.
//!
//! Two interchangeable policies, selected by configuration and never active
//! at the same time: direct-seek walks straight at the player's live
//! position each tick (walls are ignored), while history-replay teleports
//! the enemy onto a delayed recording of the player's own committed path.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::game::Actor;
use crate::game::history::{DelayGate, PositionHistory};

/// Which pursuit behavior drives the enemy. A configuration choice; the two
/// are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitPolicy {
    /// Advance `enemy.speed` units per tick along the unit vector toward
    /// the player's current position. No obstacle avoidance.
    DirectSeek,
    /// Replay the player's delayed history samples, one per gate opening,
    /// copying each sample exactly with no interpolation.
    HistoryReplay,
}

/// Drives the enemy each tick under the configured policy.
#[derive(Debug, Clone)]
pub struct PursuitController {
    pub policy: PursuitPolicy,
    gate: DelayGate,
}

impl PursuitController {
    pub fn new(policy: PursuitPolicy, replay_delay_ms: u64) -> Self {
        Self {
            policy,
            gate: DelayGate::new(replay_delay_ms),
        }
    }

    /// Advances the enemy by one tick.
    ///
    /// For history-replay the buffer is consumed here, before the current
    /// tick's sample is recorded, so the enemy can never replay state that
    /// has not been committed yet. A buffer with no sample ready is a
    /// no-op.
    pub fn update(
        &mut self,
        enemy: &mut Actor,
        player: &Actor,
        history: &mut PositionHistory,
        elapsed_ms: u64,
    ) {
        match self.policy {
            PursuitPolicy::DirectSeek => {
                let to_player = player.transform.position - enemy.transform.position;
                if to_player.length() == 0.0 {
                    return;
                }
                let direction = to_player.normalize();
                enemy.transform.position = enemy.transform.position + direction * enemy.speed;
                enemy.transform.yaw = direction.x().atan2(direction.z());
            }
            PursuitPolicy::HistoryReplay => {
                if !self.gate.tick(elapsed_ms) {
                    return;
                }
                let Some(sample) = history.consume_oldest() else {
                    return;
                };
                debug!("enemy replaying tick {} sample", sample.tick);
                enemy.transform.position = sample.position;
                enemy.transform.yaw = sample.yaw;
            }
        }
    }

    /// Drops any accumulated delay. Used on game reset.
    pub fn reset(&mut self) {
        self.gate.reset();
    }
}

/// True when the enemy's bounds overlap the player's. The caller decides
/// whether a catch ends the run; that check is policy, not behavior baked
/// in here.
pub fn caught(enemy: &Actor, player: &Actor) -> bool {
    let enemy_bounds = enemy.collider.bounds(&enemy.transform);
    let player_bounds = player.collider.bounds(&player.transform);
    enemy_bounds.intersects(&player_bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::Collider;
    use crate::game::history::HistorySample;
    use crate::game::{ActorRole, Transform};
    use crate::math::Vec3;

    fn actor(role: ActorRole, speed: f32, x: f32, z: f32) -> Actor {
        Actor {
            transform: Transform {
                position: Vec3::new(x, 1.0, z),
                yaw: 0.0,
            },
            spawn: Transform {
                position: Vec3::new(x, 1.0, z),
                yaw: 0.0,
            },
            speed,
            collider: Collider::centered_box(Vec3::new(0.3, 0.9, 0.3)),
            role,
        }
    }

    /// A direct-seeking enemy starting D away reaches the stationary player
    /// within ceil(D / speed) ticks.
    #[test]
    fn direct_seek_converges() {
        let player = actor(ActorRole::Player, 0.1, 0.0, 0.0);
        let mut enemy = actor(ActorRole::Enemy, 0.05, 3.0, 4.0);
        let mut history = PositionHistory::new(100);
        let mut controller = PursuitController::new(PursuitPolicy::DirectSeek, 10_000);

        let distance = enemy
            .transform
            .position
            .distance_to(&player.transform.position);
        let ticks = (distance / enemy.speed).ceil() as usize;

        for _ in 0..ticks {
            controller.update(&mut enemy, &player, &mut history, 100);
        }
        assert!(caught(&enemy, &player));
    }

    #[test]
    fn direct_seek_faces_its_prey() {
        let player = actor(ActorRole::Player, 0.1, 0.0, 0.0);
        let mut enemy = actor(ActorRole::Enemy, 0.05, 0.0, 5.0);
        let mut history = PositionHistory::new(100);
        let mut controller = PursuitController::new(PursuitPolicy::DirectSeek, 10_000);

        controller.update(&mut enemy, &player, &mut history, 100);
        // Player sits at -Z from the enemy; that heading is pi.
        assert!((enemy.transform.yaw.abs() - std::f32::consts::PI).abs() < 1e-5);
    }

    /// Replay copies the delayed sample exactly, no interpolation.
    #[test]
    fn history_replay_teleports_to_delayed_sample() {
        let player = actor(ActorRole::Player, 0.1, 0.0, 0.0);
        let mut enemy = actor(ActorRole::Enemy, 0.05, 9.0, 9.0);
        let mut history = PositionHistory::new(100);
        let mut controller = PursuitController::new(PursuitPolicy::HistoryReplay, 1_000);

        let recorded = HistorySample {
            position: Vec3::new(1.25, 1.0, -7.5),
            yaw: std::f32::consts::FRAC_PI_2,
            tick: 42,
        };
        history.record(recorded);

        // Gate not yet open: the enemy stays put.
        for _ in 0..9 {
            controller.update(&mut enemy, &player, &mut history, 100);
        }
        assert_eq!(enemy.transform.position, Vec3::new(9.0, 1.0, 9.0));

        // Tenth tick crosses the 1000 ms threshold.
        controller.update(&mut enemy, &player, &mut history, 100);
        assert_eq!(enemy.transform.position, recorded.position);
        assert_eq!(enemy.transform.yaw, recorded.yaw);
    }

    /// An open gate with an empty buffer is a no-op, not an error.
    #[test]
    fn history_replay_with_empty_buffer_is_noop() {
        let player = actor(ActorRole::Player, 0.1, 0.0, 0.0);
        let mut enemy = actor(ActorRole::Enemy, 0.05, 9.0, 9.0);
        let mut history = PositionHistory::new(100);
        let mut controller = PursuitController::new(PursuitPolicy::HistoryReplay, 100);

        controller.update(&mut enemy, &player, &mut history, 100);
        assert_eq!(enemy.transform.position, Vec3::new(9.0, 1.0, 9.0));
    }

    #[test]
    fn overlapping_actors_count_as_caught() {
        let player = actor(ActorRole::Player, 0.1, 0.0, 0.0);
        let enemy = actor(ActorRole::Enemy, 0.05, 0.4, 0.0);
        assert!(caught(&enemy, &player));

        let far_enemy = actor(ActorRole::Enemy, 0.05, 5.0, 0.0);
        assert!(!caught(&far_enemy, &player));
    }
}
