//! Per-cycle sample frame
//!
//! One `SampleFrame` is shared by the host with every node during a cycle.
//! Slots hold `Option<f32>` so downstream consumers can tell "no new sample
//! this cycle" apart from a genuine zero. The host clears the slots between
//! cycles; nodes only ever write.

use super::channel::{ChannelIndex, MAX_CHANNELS};

/// Sample buffer for a single acquisition cycle
pub struct SampleFrame {
    /// One slot per registered channel, `None` until written this cycle
    slots: [Option<f32>; MAX_CHANNELS],
    /// Number of event sweeps requested since construction
    event_sweeps: u32,
}

impl SampleFrame {
    /// Create a frame with all slots empty
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_CHANNELS],
            event_sweeps: 0,
        }
    }

    /// Write one value into a channel slot for the current cycle
    pub fn write_sample(&mut self, index: ChannelIndex, value: f32) {
        if let Some(slot) = self.slots.get_mut(index.slot()) {
            *slot = Some(value);
        }
    }

    /// Value written to a slot this cycle, if any
    pub fn sample(&self, index: ChannelIndex) -> Option<f32> {
        self.slots.get(index.slot()).copied().flatten()
    }

    /// Number of slots written this cycle
    pub fn written_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Reset all slots for the next cycle
    ///
    /// The sweep counter is cumulative and survives clearing.
    pub fn clear(&mut self) {
        self.slots = [None; MAX_CHANNELS];
    }

    /// Process pending discrete events now
    ///
    /// Nodes call this exactly once at the end of every cycle, regardless of
    /// whether they produced samples. The frame counts invocations so hosts
    /// and tests can audit that property.
    pub fn process_events(&mut self) {
        self.event_sweeps += 1;
    }

    /// Total number of event sweeps since construction
    pub fn event_sweeps(&self) -> u32 {
        self.event_sweeps
    }
}

impl Default for SampleFrame {
    fn default() -> Self {
        Self::new()
    }
}
