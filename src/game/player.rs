//! Player movement: held-direction input to a candidate transform, then
//! collision resolution.
//!
//! # Movement Model
//!
//! Movement is grid-free but axis-locked: each held direction flag
//! contributes a fixed delta along one world axis and overwrites the
//! actor's heading with that direction's cardinal yaw. Flags are evaluated
//! in a fixed order (forward, back, left, right) every tick, so position
//! deltas compose additively while the heading is simply the last one
//! evaluated. The whole candidate, position and heading together, is then
//! accepted or reverted as a unit by the collision resolver.

use log::trace;

use crate::game::Actor;
use crate::game::collision::{self, StaticObstacleSet};
use crate::game::keys::DirectionFlags;
use crate::math::{YAW_BACK, YAW_FORWARD, YAW_LEFT, YAW_RIGHT};

/// Advances the player by one tick of held input.
///
/// Builds the candidate transform from `flags`, validates it against the
/// maze, and commits the accepted transform back onto the actor. When the
/// obstacle set has not materialized yet the collision check is skipped for
/// the tick and the candidate commits unvalidated.
///
/// Returns true when the candidate was rejected and the actor kept its
/// pre-tick transform.
pub fn step(actor: &mut Actor, flags: DirectionFlags, obstacles: Option<&StaticObstacleSet>) -> bool {
    if !flags.any() {
        return false;
    }

    let before = actor.transform;
    let mut candidate = before;
    let speed = actor.speed;

    // Fixed evaluation order; later checks overwrite the heading.
    if flags.forward {
        candidate.position.0[2] -= speed;
        candidate.yaw = YAW_FORWARD;
    }
    if flags.back {
        candidate.position.0[2] += speed;
        candidate.yaw = YAW_BACK;
    }
    if flags.left {
        candidate.position.0[0] -= speed;
        candidate.yaw = YAW_LEFT;
    }
    if flags.right {
        candidate.position.0[0] += speed;
        candidate.yaw = YAW_RIGHT;
    }

    let Some(obstacles) = obstacles else {
        // Maze still loading: nothing to test against this tick.
        actor.transform = candidate;
        return false;
    };

    let resolution = collision::resolve(&before, candidate, &actor.collider, obstacles);
    if resolution.blocked {
        trace!("player move blocked at {:?}", before.position);
    }
    actor.transform = resolution.accepted;
    resolution.blocked
}
