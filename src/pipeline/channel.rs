//! Channel registration
//!
//! Hosts expose a bounded table of continuous channels. Nodes register their
//! outputs once at construction and receive opaque indices they use for every
//! subsequent per-cycle write. Indices are only handed out by the registry,
//! so a held `ChannelIndex` always refers to a registered slot.

/// Maximum number of continuous channels a host exposes
pub const MAX_CHANNELS: usize = 32;

/// Pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// Channel table is full
    ChannelTableFull,
}

impl core::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PipelineError::ChannelTableFull => write!(f, "channel table full"),
        }
    }
}

/// Kind of signal carried by a continuous channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelKind {
    /// Neural electrode signal
    Electrode,
    /// Auxiliary analog signal
    Aux,
    /// Inertial measurement axis
    Imu,
}

/// Opaque handle to a registered channel slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelIndex(usize);

impl ChannelIndex {
    /// Raw slot position within the host frame
    pub const fn slot(&self) -> usize {
        self.0
    }
}

/// Channel metadata held by the registry
#[derive(Debug, Clone, Copy)]
pub struct ChannelDescriptor {
    /// Human-readable channel label
    pub label: &'static str,
    /// Signal kind
    pub kind: ChannelKind,
}

/// Bounded channel table
///
/// Registration order defines slot order: the first registered channel
/// occupies slot 0 and so on. There is no deregistration.
pub struct ChannelRegistry {
    channels: heapless::Vec<ChannelDescriptor, MAX_CHANNELS>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            channels: heapless::Vec::new(),
        }
    }

    /// Register a channel, returning its slot handle
    pub fn register(
        &mut self,
        label: &'static str,
        kind: ChannelKind,
    ) -> Result<ChannelIndex, PipelineError> {
        let index = self.channels.len();
        self.channels
            .push(ChannelDescriptor { label, kind })
            .map_err(|_| PipelineError::ChannelTableFull)?;
        Ok(ChannelIndex(index))
    }

    /// Get channel count
    pub fn count(&self) -> usize {
        self.channels.len()
    }

    /// Get channel metadata by slot position
    pub fn get(&self, index: usize) -> Option<&ChannelDescriptor> {
        self.channels.get(index)
    }

    /// Iterate over registered channels in slot order
    pub fn iter(&self) -> impl Iterator<Item = &ChannelDescriptor> {
        self.channels.iter()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
