//! Spotlight aim tracking and the door-reveal trigger mechanic.
//!
//! # Overview
//!
//! A single spotlight hangs over the maze. In puzzle mode its aim target
//! tracks the player every tick, and any registered door whose detector
//! lies close enough to the beam's aim direction starts sinking into the
//! floor, opening a path.
//!
//! # The Alignment Heuristic
//!
//! "Close enough" is a cone test on directions only: the unit vector from
//! the light to its aim target is compared against the unit vector from
//! the light to the door's detector, and the door fires while the dot
//! product strictly exceeds the configured threshold (0.90 by default,
//! about a 26 degree half-angle). Distance is not checked and nothing
//! occludes the beam; a wall between light and door does not stop the
//! reveal. A raycast-based illumination test would close that gap and
//! remains an unimplemented alternative; the cone heuristic is the
//! authoritative behavior.

use log::info;
use rand::Rng;

use crate::math::Vec3;

/// Preset beam colors cycled by the palette key.
pub const LIGHT_PALETTE: [[f32; 3]; 5] = [
    [1.0, 1.0, 1.0],
    [1.0, 0.85, 0.6],
    [0.7, 0.85, 1.0],
    [1.0, 0.6, 0.6],
    [0.7, 1.0, 0.75],
];

/// The overhead spotlight: a position, the point it is aimed at, and a
/// beam color for the renderer.
#[derive(Debug, Clone)]
pub struct Spotlight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: [f32; 3],
}

impl Spotlight {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            color: LIGHT_PALETTE[0],
        }
    }

    /// Unit direction from the light toward its current aim target.
    pub fn aim_direction(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Switches the beam to a random palette color other than the current
    /// one.
    pub fn cycle_palette<R: Rng>(&mut self, rng: &mut R) {
        let current = self.color;
        loop {
            let candidate = LIGHT_PALETTE[rng.gen_range(0..LIGHT_PALETTE.len())];
            if candidate != current {
                self.color = candidate;
                break;
            }
        }
    }
}

/// A door paired with the detector point the beam must find.
///
/// The height only ever decreases during play, one step per triggered
/// tick, and clamps at the configured floor. Re-raising happens solely
/// through [`TriggerDoor::reset`] on a game reset.
#[derive(Debug, Clone)]
pub struct TriggerDoor {
    /// Where the paired detector sits in the world.
    pub detector: Vec3,
    height: f32,
    initial_height: f32,
}

impl TriggerDoor {
    pub fn new(detector: Vec3, height: f32) -> Self {
        Self {
            detector,
            height,
            initial_height: height,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// True once the door has sunk all the way to `floor`.
    pub fn is_lowered(&self, floor: f32) -> bool {
        self.height <= floor
    }

    /// Sinks the door by `step`, clamped at `floor`. Calls at the floor are
    /// no-ops.
    pub fn lower(&mut self, step: f32, floor: f32) {
        if self.height > floor {
            self.height = (self.height - step).max(floor);
        }
    }

    /// Restores the load-time height. Game reset only.
    pub fn reset(&mut self) {
        self.height = self.initial_height;
    }
}

/// Cosine of the angle between the beam's aim and the direction to
/// `detector`, both measured from the light's position.
pub fn alignment(light: &Spotlight, detector: Vec3) -> f32 {
    let aim = light.aim_direction();
    let to_detector = (detector - light.position).normalize();
    aim.dot(&to_detector)
}

/// Strict threshold comparison for the reveal cone. A dot product exactly
/// at the threshold does not fire.
pub fn aligned_past_threshold(dot: f32, threshold: f32) -> bool {
    dot > threshold
}

/// Runs one tick of the reveal check over every registered door.
///
/// Doors inside the beam cone sink by `step` this tick; all others are
/// left alone. Already-floored doors are unaffected either way.
pub fn evaluate_reveals(
    light: &Spotlight,
    doors: &mut [TriggerDoor],
    threshold: f32,
    step: f32,
    floor: f32,
) {
    for door in doors.iter_mut() {
        let dot = alignment(light, door.detector);
        if aligned_past_threshold(dot, threshold) {
            let was_up = !door.is_lowered(floor);
            door.lower(step, floor);
            if was_up && door.is_lowered(floor) {
                info!("door at {:?} fully lowered", door.detector.as_array());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_aiming_down_z() -> Spotlight {
        Spotlight::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 10.0, 20.0))
    }

    /// A detector dead on the beam axis fires; one far off axis does not.
    #[test]
    fn on_axis_detector_lowers_door() {
        let light = light_aiming_down_z();
        let mut doors = vec![
            TriggerDoor::new(Vec3::new(0.0, 10.0, 12.0), 0.0),
            TriggerDoor::new(Vec3::new(15.0, 10.0, 0.0), 0.0),
        ];

        evaluate_reveals(&light, &mut doors, 0.90, 0.1, -10.0);
        assert!(doors[0].height() < 0.0, "aligned door sinks");
        assert_eq!(doors[1].height(), 0.0, "off-axis door untouched");
    }

    /// The comparison is strictly greater-than: just below and exactly at
    /// the threshold must not fire, just above must.
    #[test]
    fn threshold_boundary_is_exclusive() {
        assert!(!aligned_past_threshold(0.899999, 0.90));
        assert!(!aligned_past_threshold(0.90, 0.90));
        assert!(aligned_past_threshold(0.9000001, 0.90));
    }

    /// Same boundary exercised through the geometric path: a perfectly
    /// aligned detector has dot 1.0, which fails a threshold of 1.0 and
    /// passes anything below it.
    #[test]
    fn exact_alignment_respects_strict_comparison() {
        let light = light_aiming_down_z();
        let detector = Vec3::new(0.0, 10.0, 5.0);
        let dot = alignment(&light, detector);
        assert_eq!(dot, 1.0);

        let mut doors = vec![TriggerDoor::new(detector, 0.0)];
        evaluate_reveals(&light, &mut doors, 1.0, 0.1, -10.0);
        assert_eq!(doors[0].height(), 0.0);

        evaluate_reveals(&light, &mut doors, 0.99, 0.1, -10.0);
        assert!(doors[0].height() < 0.0);
    }

    /// Repeated lowering clamps at the floor and further calls are no-ops.
    #[test]
    fn door_clamps_at_floor() {
        let mut door = TriggerDoor::new(Vec3::new(0.0, 0.0, 0.0), 0.0);
        for _ in 0..500 {
            door.lower(0.1, -10.0);
        }
        assert_eq!(door.height(), -10.0);
        assert!(door.is_lowered(-10.0));

        door.lower(0.1, -10.0);
        assert_eq!(door.height(), -10.0);
    }

    #[test]
    fn reset_restores_initial_height() {
        let mut door = TriggerDoor::new(Vec3::new(0.0, 0.0, 0.0), 2.5);
        door.lower(0.1, -10.0);
        assert!(door.height() < 2.5);
        door.reset();
        assert_eq!(door.height(), 2.5);
    }

    #[test]
    fn palette_cycle_always_changes_color() {
        let mut light = light_aiming_down_z();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let before = light.color;
            light.cycle_palette(&mut rng);
            assert_ne!(light.color, before);
        }
    }
}
