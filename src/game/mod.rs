//! Game state management module.
//!
//! This module defines the [`SimulationState`] struct, which owns every
//! piece of mutable world state, and the per-tick orchestration that
//! advances it. There are no ambient globals: the tick driver owns one
//! `SimulationState` and passes it to each subsystem in a fixed order.
//!
//! # Tick Order
//!
//! 1. Player motion from held input, validated by the collision resolver.
//! 2. Enemy pursuit, which under history-replay consumes the buffer before
//!    this tick's sample is recorded.
//! 3. The committed player transform is recorded into the history buffer.
//! 4. Catch check, which may end the run.
//! 5. Spotlight tracking and door-reveal evaluation (puzzle mode).
//! 6. Score recomputation from spawn displacement.
//!
//! The render trigger is invoked by the driver after the tick, outside
//! this module.

pub mod collision;
pub mod enemy;
pub mod history;
pub mod keys;
pub mod light;
pub mod player;
pub mod score;

use log::info;

use self::collision::{Collider, StaticObstacleSet};
use self::enemy::PursuitController;
use self::history::{HistorySample, PositionHistory};
use self::light::{Spotlight, TriggerDoor, evaluate_reveals};
use self::score::HighScoreTable;
use crate::config::TuningConfig;
use crate::math::Vec3;
use crate::maze::Level;

/// World-space placement of an actor: a position plus a yaw-only
/// orientation. Owned exclusively by its actor and mutated only by that
/// actor's controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Heading about the world Y axis, radians.
    pub yaw: f32,
}

/// Distinguishes the two actor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Player,
    Enemy,
}

/// A player or enemy: a transform, a fixed move speed, the collider its
/// bounds derive from, and a role tag.
#[derive(Debug, Clone)]
pub struct Actor {
    pub transform: Transform,
    /// Where this actor (re)spawns. Reset restores the transform to this.
    pub spawn: Transform,
    /// Movement per tick in world units.
    pub speed: f32,
    pub collider: Collider,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(role: ActorRole, spawn: Transform, speed: f32, collider: Collider) -> Self {
        Self {
            transform: spawn,
            spawn,
            speed,
            collider,
            role,
        }
    }

    /// Puts the actor back on its spawn transform.
    pub fn respawn(&mut self) {
        self.transform = self.spawn;
    }
}

/// Which phase the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    /// Waiting for the begin key; the world is idle.
    Title,
    /// A run is underway.
    Game,
}

/// What happened during one tick, for the driver and the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    /// The player's candidate move was rejected this tick.
    pub blocked: bool,
    /// The enemy caught the player and the run was reset.
    pub caught: bool,
    /// Score of the run that just ended, when one did.
    pub final_score: Option<u32>,
}

/// Represents the entire mutable state of the game.
///
/// Actors and the obstacle set materialize asynchronously; anything still
/// `None` simply has its dependent logic skipped each tick until it
/// arrives.
pub struct SimulationState {
    pub config: TuningConfig,
    pub screen: CurrentScreen,
    /// Ticks advanced since the state was created.
    pub tick: u64,
    pub player: Actor,
    /// The pursuing enemy, once its assets have materialized.
    pub enemy: Option<Actor>,
    /// Wall geometry, once the level has materialized.
    pub maze: Option<StaticObstacleSet>,
    pub doors: Vec<TriggerDoor>,
    pub light: Spotlight,
    pub history: PositionHistory,
    pub pursuit: PursuitController,
    /// Displacement score, recomputed every tick.
    pub score: u32,
    pub high_scores: HighScoreTable,
}

/// Half-extents of the default actor collision box.
pub const ACTOR_HALF_EXTENTS: [f32; 3] = [0.3, 0.9, 0.3];

impl SimulationState {
    /// Creates an idle state with nothing loaded yet.
    pub fn new(config: TuningConfig, high_scores: HighScoreTable) -> Self {
        let history = PositionHistory::new(config.history_capacity());
        let pursuit = PursuitController::new(config.pursuit_policy(), config.replay_delay_ms());
        let player = Actor::new(
            ActorRole::Player,
            Transform::default(),
            config.player_speed(),
            Collider::centered_box(Vec3(ACTOR_HALF_EXTENTS)),
        );
        Self {
            config,
            screen: CurrentScreen::Title,
            tick: 0,
            player,
            enemy: None,
            maze: None,
            doors: Vec::new(),
            light: Spotlight::new(Vec3::new(0.0, 12.0, 0.0), Vec3::new(0.0, 0.0, 0.0)),
            history,
            pursuit,
            score: 0,
            high_scores,
        }
    }

    /// Installs a loaded level: obstacle set, doors, light anchor, and the
    /// player's spawn.
    pub fn install_level(&mut self, level: Level) {
        info!("level ready: {} walls, {} doors", level.obstacles.len(), level.doors.len());
        self.player.spawn = level.player_spawn;
        self.player.respawn();
        self.light = Spotlight::new(level.light_position, level.player_spawn.position);
        self.doors = level.doors;
        self.maze = Some(level.obstacles);
    }

    /// Installs the enemy actor once its assets are ready.
    pub fn install_enemy(&mut self, spawn: Transform) {
        info!("enemy ready at {:?}", spawn.position.as_array());
        self.enemy = Some(Actor::new(
            ActorRole::Enemy,
            spawn,
            self.config.enemy_speed(),
            Collider::centered_box(Vec3(ACTOR_HALF_EXTENTS)),
        ));
    }

    /// Starts a run if the session is idle.
    pub fn begin(&mut self) {
        if self.screen == CurrentScreen::Title {
            info!("run started");
            self.screen = CurrentScreen::Game;
        }
    }

    /// Advances the world by one tick of held input.
    ///
    /// Idle sessions do not advance. The returned report tells the driver
    /// whether anything ended this tick.
    pub fn advance(&mut self, flags: keys::DirectionFlags) -> TickReport {
        if self.screen != CurrentScreen::Game {
            return TickReport::default();
        }

        self.tick += 1;
        let tick_ms = self.config.tick_interval_ms();
        let mut report = TickReport::default();

        // Motion first: the player's transform is committed (or reverted)
        // before anything else looks at it.
        report.blocked = player::step(&mut self.player, flags, self.maze.as_ref());

        // Pursuit consumes history before this tick's sample is recorded,
        // so replay can never use not-yet-committed state.
        if let Some(enemy_actor) = self.enemy.as_mut() {
            self.pursuit
                .update(enemy_actor, &self.player, &mut self.history, tick_ms);
        }

        self.history.record(HistorySample {
            position: self.player.transform.position,
            yaw: self.player.transform.yaw,
            tick: self.tick,
        });

        if self.config.catch_resets() {
            let was_caught = self
                .enemy
                .as_ref()
                .is_some_and(|enemy_actor| enemy::caught(enemy_actor, &self.player));
            if was_caught {
                let final_score = self.score;
                info!("caught at score {final_score}; resetting run");
                self.high_scores.submit(final_score);
                self.reset_world();
                report.caught = true;
                report.final_score = Some(final_score);
                return report;
            }
        }

        if self.config.puzzle_mode() {
            self.light.target = self.player.transform.position;
            evaluate_reveals(
                &self.light,
                &mut self.doors,
                self.config.reveal_threshold(),
                self.config.door_lower_step(),
                self.config.door_floor(),
            );
        }

        self.score = score::displacement_score(&self.player);
        report
    }

    /// Cycles the spotlight palette. Edge-triggered by the host.
    pub fn cycle_palette<R: rand::Rng>(&mut self, rng: &mut R) {
        self.light.cycle_palette(rng);
    }

    /// Synchronously reinitializes all mutable run state: actors back on
    /// their spawns, doors re-raised, history and score cleared. The
    /// session returns to the title screen awaiting the next begin edge.
    pub fn reset_world(&mut self) {
        self.player.respawn();
        if let Some(enemy_actor) = self.enemy.as_mut() {
            enemy_actor.respawn();
        }
        for door in &mut self.doors {
            door.reset();
        }
        self.history.clear();
        self.pursuit.reset();
        self.score = 0;
        self.screen = CurrentScreen::Title;
    }
}
