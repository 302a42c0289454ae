//! Static level geometry: the maze walls, spawn points, doors, and light.
//!
//! Levels are described as character maps, one row of cells per line:
//!
//! ```text
//! #   wall cell
//! .   open floor
//! P   player spawn
//! E   enemy spawn
//! D   trigger door (detector at the cell center)
//! L   spotlight anchor
//! ```
//!
//! The map is centered on the world origin in the XZ plane. Parsing
//! produces an immutable [`StaticObstacleSet`] plus the level's spawn
//! transforms; nothing here mutates during play.

use crate::game::Transform;
use crate::game::collision::{Aabb, StaticObstacleSet};
use crate::game::light::TriggerDoor;
use crate::math::Vec3;

/// Side length of one map cell in world units.
pub const CELL_SIZE: f32 = 2.0;
/// Wall height in world units.
pub const WALL_HEIGHT: f32 = 4.0;
/// Eye height actors stand at.
pub const ACTOR_HEIGHT: f32 = 1.0;
/// How far above the floor the spotlight hangs.
pub const LIGHT_HEIGHT: f32 = 12.0;

/// The default level: a walled yard with an inner pocket, one door sealing
/// the pocket's exit, and the enemy across the yard from the player.
pub const DEFAULT_LEVEL_MAP: &str = "\
###############
#.....E.......#
#.###.#####.#.#
#.#.......#.#.#
#.#.#####.#.#.#
#...#...#...#.#
#.###.#.###.#.#
#.....#.L.D.#.#
#.#####.###.#.#
#.#...#.#...#.#
#.#.#...#.###.#
#.#.#####.....#
#.#.......###.#
#.....P.......#
###############";

/// Everything parsed out of one level map.
#[derive(Debug, Clone)]
pub struct Level {
    pub obstacles: StaticObstacleSet,
    pub player_spawn: Transform,
    pub enemy_spawn: Transform,
    pub doors: Vec<TriggerDoor>,
    pub light_position: Vec3,
}

/// Parses a character map into level geometry.
///
/// Rows map to the Z axis and columns to the X axis, with the whole grid
/// centered on the origin. Each wall cell becomes one world-space box from
/// floor to [`WALL_HEIGHT`].
pub fn parse_level_map(map: &str) -> Level {
    let rows: Vec<&str> = map.lines().collect();
    let height = rows.len();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);

    let origin_x = -(width as f32 * CELL_SIZE) / 2.0;
    let origin_z = -(height as f32 * CELL_SIZE) / 2.0;

    let mut walls = Vec::new();
    let mut doors = Vec::new();
    let mut player_spawn = Transform::default();
    let mut enemy_spawn = Transform::default();
    let mut light_position = Vec3::new(0.0, LIGHT_HEIGHT, 0.0);

    for (row, line) in rows.iter().enumerate() {
        for (col, cell) in line.chars().enumerate() {
            let x = origin_x + col as f32 * CELL_SIZE + CELL_SIZE / 2.0;
            let z = origin_z + row as f32 * CELL_SIZE + CELL_SIZE / 2.0;

            match cell {
                '#' => walls.push(Aabb::new(
                    [x - CELL_SIZE / 2.0, 0.0, z - CELL_SIZE / 2.0],
                    [x + CELL_SIZE / 2.0, WALL_HEIGHT, z + CELL_SIZE / 2.0],
                )),
                'P' => {
                    player_spawn = Transform {
                        position: Vec3::new(x, ACTOR_HEIGHT, z),
                        yaw: 0.0,
                    };
                }
                'E' => {
                    enemy_spawn = Transform {
                        position: Vec3::new(x, ACTOR_HEIGHT, z),
                        yaw: 0.0,
                    };
                }
                'D' => doors.push(TriggerDoor::new(Vec3::new(x, ACTOR_HEIGHT, z), 0.0)),
                'L' => light_position = Vec3::new(x, LIGHT_HEIGHT, z),
                _ => {}
            }
        }
    }

    Level {
        obstacles: StaticObstacleSet::new(walls),
        player_spawn,
        enemy_spawn,
        doors,
        light_position,
    }
}

/// Builds the default level.
pub fn default_level() -> Level {
    parse_level_map(DEFAULT_LEVEL_MAP)
}
