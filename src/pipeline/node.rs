//! Pipeline node contract
//!
//! Hosts drive processing through this trait rather than through any concrete
//! node type: they hold `&mut dyn PipelineNode` (or a generic parameter) and
//! invoke the hooks at the appropriate points of the acquisition lifecycle.
//! Only the per-cycle hook is mandatory; everything else defaults to a no-op
//! so simple source nodes implement exactly one method.

use super::event::{SpikeEvent, TtlEvent};
use super::frame::SampleFrame;
use crate::core::parameters::SettingsDocument;

/// Processing node driven by a host acquisition loop
pub trait PipelineNode {
    /// Produce this cycle's samples into the shared frame
    ///
    /// Called once per acquisition cycle while the pipeline is running. The
    /// node must complete normally every cycle; device trouble is expressed
    /// by not writing samples, never by failing the cycle.
    fn on_cycle(&mut self, frame: &mut SampleFrame);

    /// React to a TTL line transition
    fn on_ttl_event(&mut self, _event: &TtlEvent) {}

    /// React to a detected spike
    fn on_spike(&mut self, _event: &SpikeEvent) {}

    /// React to a broadcast message from another node
    fn on_broadcast(&mut self, _message: &str) {}

    /// Re-read host-side configuration after the signal chain changed
    fn update_settings(&mut self) {}

    /// Persist node settings into the host document
    fn save_settings(&mut self, _document: &mut SettingsDocument) {}

    /// Restore node settings from the host document
    fn load_settings(&mut self, _document: &SettingsDocument) {}
}
