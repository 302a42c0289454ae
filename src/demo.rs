//! Scripted demo drive for headless runs.
//!
//! Stands in for a windowed host's input wiring: a begin press, a walk
//! around the yard, a palette tap partway through. Useful for exercising
//! the whole tick loop without any renderer attached.

use crate::game::keys::{GameKey, InputState};

/// Held-movement segments of the demo walk, as half-open iteration
/// ranges.
const SEGMENTS: &[(u64, u64, GameKey)] = &[
    (1, 90, GameKey::MoveForward),
    (50, 80, GameKey::MoveLeft),
    (90, 150, GameKey::MoveRight),
    (150, 240, GameKey::MoveBackward),
    (200, 240, GameKey::MoveLeft),
];

/// Iteration at which the demo taps the palette key.
const PALETTE_TICK: u64 = 60;

/// Feeds the scripted input for loop `iteration` into `input`.
pub fn pump(iteration: u64, input: &mut InputState) {
    if iteration == 0 {
        input.press_key(GameKey::Begin);
    }

    if iteration == PALETTE_TICK {
        input.press_key(GameKey::CyclePalette);
    } else if iteration == PALETTE_TICK + 1 {
        input.release_key(GameKey::CyclePalette);
    }

    for key in [
        GameKey::MoveForward,
        GameKey::MoveBackward,
        GameKey::MoveLeft,
        GameKey::MoveRight,
    ] {
        let held = SEGMENTS
            .iter()
            .any(|&(start, end, segment_key)| segment_key == key && (start..end).contains(&iteration));
        if held {
            input.press_key(key);
        } else {
            input.release_key(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_begins_on_the_first_tick() {
        let mut input = InputState::new();
        pump(0, &mut input);
        assert!(input.take_begin());
    }

    #[test]
    fn segments_hold_and_release() {
        let mut input = InputState::new();
        pump(10, &mut input);
        assert!(input.direction_flags().forward);

        pump(60, &mut input);
        let flags = input.direction_flags();
        assert!(flags.forward && flags.left, "overlapping segments compose");

        pump(100, &mut input);
        let flags = input.direction_flags();
        assert!(!flags.forward && !flags.left);
        assert!(flags.right);
    }
}
