//! Discrete event types
//!
//! Plain data carried to nodes by the host's event hooks. Source nodes that
//! only produce continuous samples typically ignore them.

/// State change on a TTL line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TtlEvent {
    /// TTL line number
    pub line: u8,
    /// New line state
    pub state: bool,
    /// Sample number at which the transition occurred
    pub sample_number: u64,
}

/// Detected spike on an electrode channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpikeEvent {
    /// Source electrode channel
    pub channel: u16,
    /// Sample number of the spike peak
    pub sample_number: u64,
}
