//! Host pipeline contract
//!
//! Minimal model of the acquisition pipeline a source node plugs into:
//! channel registration at construction time, a shared per-cycle sample
//! frame, discrete event types, and the `PipelineNode` trait the host
//! dispatches through.
//!
//! ## Modules
//!
//! - `channel`: bounded channel table and registration
//! - `event`: TTL and spike event payloads
//! - `frame`: per-cycle sample frame with event sweep accounting
//! - `node`: the node trait hosts drive

pub mod channel;
pub mod event;
pub mod frame;
pub mod node;

pub use channel::{
    ChannelDescriptor, ChannelIndex, ChannelKind, ChannelRegistry, PipelineError, MAX_CHANNELS,
};
pub use event::{SpikeEvent, TtlEvent};
pub use frame::SampleFrame;
pub use node::PipelineNode;
