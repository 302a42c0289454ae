//! Time-sampled position history for delayed-playback pursuit.
//!
//! Every tick the player's just-committed transform is appended to a
//! bounded FIFO buffer. The pursuing enemy does not read the live buffer
//! directly; a [`DelayGate`] meters out consumption so that replayed
//! samples trail the player by a configured stretch of simulated time.

use std::collections::VecDeque;

use crate::math::Vec3;

/// One recorded actor state: committed position, heading, and the tick it
/// was committed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub position: Vec3,
    pub yaw: f32,
    pub tick: u64,
}

/// Bounded FIFO of [`HistorySample`]s.
///
/// Capacity is fixed at construction. Recording when full evicts the oldest
/// sample, so the buffer holds the most recent `capacity` ticks of movement
/// and never grows beyond that.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl PositionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a just-committed sample, evicting the oldest entry when the
    /// buffer is at capacity.
    pub fn record(&mut self, sample: HistorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Pops and returns the oldest sample, or `None` when the buffer is
    /// empty. An empty buffer is a normal early-game condition, not an
    /// error.
    pub fn consume_oldest(&mut self) -> Option<HistorySample> {
        self.samples.pop_front()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops every sample. Used on game reset.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Accumulates simulated time and releases one consumption per threshold
/// crossing.
///
/// Each tick the gate is fed the tick's duration in milliseconds. When the
/// accumulator reaches the delay threshold the gate opens for that tick and
/// the accumulator resets to zero, so the consumption rate is coupled to
/// the tick cadence and the threshold, not to buffer occupancy.
#[derive(Debug, Clone)]
pub struct DelayGate {
    accumulated_ms: u64,
    threshold_ms: u64,
}

impl DelayGate {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            accumulated_ms: 0,
            threshold_ms,
        }
    }

    /// Advances the gate by one tick's worth of simulated time. Returns
    /// true when the threshold was reached this tick.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.accumulated_ms += elapsed_ms;
        if self.accumulated_ms >= self.threshold_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(tick: u64) -> HistorySample {
        HistorySample {
            position: Vec3::new(tick as f32, 0.0, 0.0),
            yaw: 0.0,
            tick,
        }
    }

    /// After capacity + k records the buffer holds exactly capacity entries
    /// and the k oldest are gone.
    #[test]
    fn buffer_is_bounded_with_fifo_eviction() {
        let capacity = 100;
        let extra = 7;
        let mut history = PositionHistory::new(capacity);

        for tick in 0..(capacity + extra) as u64 {
            history.record(sample(tick));
        }

        assert_eq!(history.len(), capacity);
        let oldest = history.consume_oldest().unwrap();
        assert_eq!(oldest.tick, extra as u64, "first {extra} samples evicted");
    }

    #[test]
    fn consume_from_empty_is_none() {
        let mut history = PositionHistory::new(10);
        assert!(history.consume_oldest().is_none());
    }

    #[test]
    fn consume_returns_oldest_first() {
        let mut history = PositionHistory::new(10);
        history.record(sample(1));
        history.record(sample(2));
        assert_eq!(history.consume_oldest().unwrap().tick, 1);
        assert_eq!(history.consume_oldest().unwrap().tick, 2);
    }

    /// The gate opens once per threshold crossing and starts over from zero.
    #[test]
    fn delay_gate_opens_on_threshold_and_resets() {
        let mut gate = DelayGate::new(10_000);

        let mut opened = 0;
        for _ in 0..100 {
            if gate.tick(100) {
                opened += 1;
            }
        }
        // 100 ticks x 100 ms = 10 000 ms: exactly one crossing.
        assert_eq!(opened, 1);

        for _ in 0..99 {
            assert!(!gate.tick(100));
        }
        assert!(gate.tick(100), "second crossing after another full period");
    }
}
