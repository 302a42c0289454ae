//! Math utilities and types for the simulation core.
//!
//! This module provides the vector type and the small set of angle helpers
//! the game logic needs. Everything works on plain `f32` world units.
//!
//! # Module Organization
//!
//! - [`vec`] module contains all vector operations (re-exported at root level)
//! - Cardinal-heading constants are provided at root level

pub mod vec;

pub use vec::Vec3;

/// Yaw heading when facing "forward" (into the maze, negative Z).
pub const YAW_FORWARD: f32 = std::f32::consts::PI;
/// Yaw heading when facing "back" (out of the maze, positive Z).
pub const YAW_BACK: f32 = 0.0;
/// Yaw heading when facing "left" (negative X).
pub const YAW_LEFT: f32 = -std::f32::consts::FRAC_PI_2;
/// Yaw heading when facing "right" (positive X).
pub const YAW_RIGHT: f32 = std::f32::consts::FRAC_PI_2;
