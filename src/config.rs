//! Simulation tuning knobs.
//!
//! Everything a debug panel would expose lives here as a named field with a
//! documented range, mutated through clamping setters rather than
//! reflection-style property binding. A host GUI binds its sliders to the
//! setters; the simulation only ever reads the values.

use serde::{Deserialize, Serialize};

use crate::game::enemy::PursuitPolicy;

/// Tunable parameters for one simulation run.
///
/// Defaults match the shipped game feel. Setters clamp to the documented
/// range instead of failing, which is what a slider-driven host wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Minimum milliseconds between ticks. Range 16..=1000, default 100.
    tick_interval_ms: u64,
    /// Player movement per tick in world units. Range 0.01..=1.0,
    /// default 0.1.
    player_speed: f32,
    /// Enemy movement per tick under direct-seek. Range 0.01..=1.0,
    /// default 0.05.
    enemy_speed: f32,
    /// Which pursuit behavior drives the enemy. Default direct-seek.
    pursuit_policy: PursuitPolicy,
    /// Simulated milliseconds between history-replay consumptions.
    /// Range 1000..=60000, default 10000; the long variant is 25000.
    replay_delay_ms: u64,
    /// Position history capacity in samples. Range 10..=1000, default 100.
    history_capacity: usize,
    /// Whether an enemy catch triggers a game reset. Default on.
    catch_resets: bool,
    /// Whether the spotlight tracks the player and doors can reveal.
    /// Default on.
    puzzle_mode: bool,
    /// Cosine threshold for the reveal cone. Range -1.0..=1.0,
    /// default 0.90.
    reveal_threshold: f32,
    /// Door sink distance per triggered tick. Range 0.01..=1.0,
    /// default 0.1.
    door_lower_step: f32,
    /// Height a lowering door clamps at. Default -10.0.
    door_floor: f32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            player_speed: 0.1,
            enemy_speed: 0.05,
            pursuit_policy: PursuitPolicy::DirectSeek,
            replay_delay_ms: 10_000,
            history_capacity: 100,
            catch_resets: true,
            puzzle_mode: true,
            reveal_threshold: 0.90,
            door_lower_step: 0.1,
            door_floor: -10.0,
        }
    }
}

impl TuningConfig {
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }
    pub fn player_speed(&self) -> f32 {
        self.player_speed
    }
    pub fn enemy_speed(&self) -> f32 {
        self.enemy_speed
    }
    pub fn pursuit_policy(&self) -> PursuitPolicy {
        self.pursuit_policy
    }
    pub fn replay_delay_ms(&self) -> u64 {
        self.replay_delay_ms
    }
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }
    pub fn catch_resets(&self) -> bool {
        self.catch_resets
    }
    pub fn puzzle_mode(&self) -> bool {
        self.puzzle_mode
    }
    pub fn reveal_threshold(&self) -> f32 {
        self.reveal_threshold
    }
    pub fn door_lower_step(&self) -> f32 {
        self.door_lower_step
    }
    pub fn door_floor(&self) -> f32 {
        self.door_floor
    }

    pub fn set_tick_interval_ms(&mut self, value: u64) {
        self.tick_interval_ms = value.clamp(16, 1000);
    }

    pub fn set_player_speed(&mut self, value: f32) {
        self.player_speed = value.clamp(0.01, 1.0);
    }

    pub fn set_enemy_speed(&mut self, value: f32) {
        self.enemy_speed = value.clamp(0.01, 1.0);
    }

    pub fn set_pursuit_policy(&mut self, policy: PursuitPolicy) {
        self.pursuit_policy = policy;
    }

    pub fn set_replay_delay_ms(&mut self, value: u64) {
        self.replay_delay_ms = value.clamp(1_000, 60_000);
    }

    pub fn set_history_capacity(&mut self, value: usize) {
        self.history_capacity = value.clamp(10, 1000);
    }

    pub fn set_catch_resets(&mut self, enabled: bool) {
        self.catch_resets = enabled;
    }

    pub fn set_puzzle_mode(&mut self, enabled: bool) {
        self.puzzle_mode = enabled;
    }

    pub fn set_reveal_threshold(&mut self, value: f32) {
        self.reveal_threshold = value.clamp(-1.0, 1.0);
    }

    pub fn set_door_lower_step(&mut self, value: f32) {
        self.door_lower_step = value.clamp(0.01, 1.0);
    }

    pub fn set_door_floor(&mut self, value: f32) {
        self.door_floor = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_feel() {
        let config = TuningConfig::default();
        assert_eq!(config.tick_interval_ms(), 100);
        assert_eq!(config.player_speed(), 0.1);
        assert_eq!(config.enemy_speed(), 0.05);
        assert_eq!(config.reveal_threshold(), 0.90);
        assert_eq!(config.door_floor(), -10.0);
        assert!(config.puzzle_mode());
    }

    #[test]
    fn setters_clamp_to_documented_ranges() {
        let mut config = TuningConfig::default();

        config.set_player_speed(99.0);
        assert_eq!(config.player_speed(), 1.0);

        config.set_reveal_threshold(2.0);
        assert_eq!(config.reveal_threshold(), 1.0);
        config.set_reveal_threshold(-2.0);
        assert_eq!(config.reveal_threshold(), -1.0);

        config.set_tick_interval_ms(1);
        assert_eq!(config.tick_interval_ms(), 16);

        config.set_replay_delay_ms(0);
        assert_eq!(config.replay_delay_ms(), 1_000);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = TuningConfig::default();
        config.set_pursuit_policy(PursuitPolicy::HistoryReplay);
        config.set_replay_delay_ms(25_000);

        let text = serde_json::to_string(&config).unwrap();
        let back: TuningConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.replay_delay_ms(), 25_000);
        assert_eq!(back.pursuit_policy(), PursuitPolicy::HistoryReplay);
    }
}
