//! Collision detection and movement resolution against static maze geometry.
//!
//! # Overview
//!
//! This module implements the spatial half of the simulation: axis-aligned
//! bounding boxes, world-space bounds computation for actor colliders, and
//! the move-then-revert resolution pass that keeps actors out of walls.
//!
//! # Core Components
//!
//! * [`Aabb`] - Axis-Aligned Bounding Box, the only collision primitive
//! * [`Collider`] - Typed tree of box primitives describing an actor's shape
//! * [`StaticObstacleSet`] - Immutable collection of wall boxes for one level
//! * [`resolve`] - The per-tick accept-or-revert movement decision
//!
//! # Resolution Policy
//!
//! Movement is speculative: the caller builds a candidate transform from
//! input, this module computes the actor's bounds at that candidate and
//! tests them against every wall, short-circuiting on the first hit. On a
//! hit the entire tick's delta is discarded, position and orientation
//! together, so diagonal input against a wall cancels motion on both axes
//! for that tick. There is no wall-sliding and no per-axis retry; that is
//! the intended policy, not a missing feature.

use crate::game::Transform;
use crate::math::Vec3;

/// Axis-Aligned Bounding Box used for all overlap queries.
///
/// Defined by its minimum and maximum corners. Intervals are closed on both
/// ends, so boxes that merely touch still count as intersecting.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum corner points.
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from a center point and half-extents along each axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: [
                center.x() - half_extents.x(),
                center.y() - half_extents.y(),
                center.z() - half_extents.z(),
            ],
            max: [
                center.x() + half_extents.x(),
                center.y() + half_extents.y(),
                center.z() + half_extents.z(),
            ],
        }
    }

    /// Expands this AABB in place to fully contain another AABB.
    pub fn expand(&mut self, other: &Aabb) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// Checks whether this AABB intersects another.
    ///
    /// Standard slab test: the boxes intersect iff their intervals overlap
    /// on all three axes. Touching faces count as an intersection.
    pub fn intersects(&self, other: &Aabb) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] || self.min[i] > other.max[i] {
                return false;
            }
        }
        true
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        )
    }
}

/// Shape of a renderable object for bounds purposes.
///
/// A collider is either a single box primitive (offset from the owning
/// actor's origin, with half-extents) or a group of child colliders. Bounds
/// of a group are the union of the bounds of every primitive beneath it,
/// which mirrors how composite scene objects are measured.
#[derive(Debug, Clone)]
pub enum Collider {
    /// One box, `offset` from the actor origin in local space.
    Primitive { offset: Vec3, half_extents: Vec3 },
    /// A composite of child colliders.
    Group(Vec<Collider>),
}

impl Collider {
    /// Convenience constructor for the common single-box actor shape.
    pub fn centered_box(half_extents: Vec3) -> Self {
        Collider::Primitive {
            offset: Vec3::new(0.0, 0.0, 0.0),
            half_extents,
        }
    }

    /// Computes the world-space AABB of this collider at `transform`.
    ///
    /// Always recomputed from the current transform; bounds are never cached
    /// across ticks because actors move every tick. Yaw rotates primitive
    /// offsets about the Y axis and widens the X/Z half-extents to cover the
    /// rotated box, which is why orientation changes participate in
    /// collision and must be reverted together with position.
    pub fn bounds(&self, transform: &Transform) -> Aabb {
        match self {
            Collider::Primitive {
                offset,
                half_extents,
            } => {
                let (sin, cos) = (transform.yaw.sin().abs(), transform.yaw.cos().abs());
                let rotated_half = Vec3::new(
                    cos * half_extents.x() + sin * half_extents.z(),
                    half_extents.y(),
                    sin * half_extents.x() + cos * half_extents.z(),
                );
                let center = transform.position + offset.rotate_y(transform.yaw);
                Aabb::from_center(center, rotated_half)
            }
            Collider::Group(children) => {
                let mut iter = children.iter();
                let mut bounds = match iter.next() {
                    Some(child) => child.bounds(transform),
                    // An empty group has no extent at the actor origin.
                    None => Aabb::from_center(transform.position, Vec3::new(0.0, 0.0, 0.0)),
                };
                for child in iter {
                    bounds.expand(&child.bounds(transform));
                }
                bounds
            }
        }
    }
}

/// Immutable wall geometry for one level.
///
/// Built once at level load and shared read-only by every actor's collision
/// check. Walls are stored as world-space AABBs; wall identity is never
/// needed, only whether anything blocks a candidate position.
#[derive(Debug, Clone, Default)]
pub struct StaticObstacleSet {
    walls: Vec<Aabb>,
}

impl StaticObstacleSet {
    pub fn new(walls: Vec<Aabb>) -> Self {
        Self { walls }
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.walls
    }

    /// True if `bounds` overlaps any wall. Short-circuits on the first hit.
    pub fn blocks(&self, bounds: &Aabb) -> bool {
        self.walls.iter().any(|wall| wall.intersects(bounds))
    }
}

/// Outcome of one movement resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The transform the actor ends the tick with.
    pub accepted: Transform,
    /// Whether the candidate was rejected and the pre-move transform kept.
    pub blocked: bool,
}

/// Resolves a candidate movement against the maze.
///
/// Computes the actor's bounds at the candidate transform and tests them
/// against every wall. If anything overlaps, the pre-move transform is
/// restored in full; otherwise the candidate is committed. One deterministic
/// pass per tick, no retries.
pub fn resolve(
    before: &Transform,
    candidate: Transform,
    collider: &Collider,
    obstacles: &StaticObstacleSet,
) -> Resolution {
    let bounds = collider.bounds(&candidate);
    if obstacles.blocks(&bounds) {
        Resolution {
            accepted: *before,
            blocked: true,
        }
    } else {
        Resolution {
            accepted: candidate,
            blocked: false,
        }
    }
}
