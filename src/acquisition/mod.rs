//! IMU acquisition node
//!
//! Source node that owns a 9-axis sensor and publishes one sample per axis
//! into fixed host channels every acquisition cycle. The sensor is brought up
//! lazily: each cycle in which it is still down costs exactly one
//! initialization attempt, and the node keeps retrying until the handshake
//! succeeds. A sensor that never appears just produces an empty channel
//! stream; the cycle itself always completes.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_source::acquisition::ImuAcquisition;
//! use imu_source::devices::imu::MockImu;
//! use imu_source::pipeline::{ChannelRegistry, PipelineNode, SampleFrame};
//!
//! let mut registry = ChannelRegistry::new();
//! let mut node = ImuAcquisition::new(MockImu::new(), &mut registry)?;
//!
//! let mut frame = SampleFrame::new();
//! loop {
//!     frame.clear();
//!     node.on_cycle(&mut frame);
//!     // consume frame samples...
//! }
//! ```

use crate::devices::traits::{Axis, AxesSample, ImuSensor, NUM_AXES};
use crate::pipeline::{
    ChannelIndex, ChannelKind, ChannelRegistry, PipelineError, PipelineNode, SampleFrame,
};

/// Channel layout: label and axis role per slot, in publication order
pub const AXIS_CHANNELS: [(&str, Axis); NUM_AXES] = [
    ("Accel X", Axis::AccelX),
    ("Accel Y", Axis::AccelY),
    ("Accel Z", Axis::AccelZ),
    ("Gyro X", Axis::GyroX),
    ("Gyro Y", Axis::GyroY),
    ("Gyro Z", Axis::GyroZ),
    ("Mag X", Axis::MagX),
    ("Mag Y", Axis::MagY),
    ("Mag Z", Axis::MagZ),
];

/// Sensor lifecycle state
///
/// Moves from `Uninitialized` to `Ready` on the first successful handshake
/// and never transitions back. Read errors after that point are treated as
/// transient and do not trigger re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    /// Handshake has not succeeded yet; retried once per cycle
    Uninitialized,
    /// Sensor is up and polled every cycle
    Ready,
}

/// 9-axis IMU source node
pub struct ImuAcquisition<S: ImuSensor> {
    /// Sensor implementation chosen at construction
    sensor: S,

    /// Lifecycle state, owned by this instance
    state: SensorState,

    /// Host channel handles, one per entry of [`AXIS_CHANNELS`]
    channels: heapless::Vec<ChannelIndex, NUM_AXES>,

    /// Most recent sample published to the host
    last_sample: Option<AxesSample>,
}

impl<S: ImuSensor> ImuAcquisition<S> {
    /// Create the node and register its nine channels with the host
    ///
    /// Channels are registered in [`AXIS_CHANNELS`] order and tagged
    /// `ChannelKind::Imu`. Fails only if the host channel table cannot hold
    /// nine more entries.
    pub fn new(sensor: S, registry: &mut ChannelRegistry) -> Result<Self, PipelineError> {
        let mut channels = heapless::Vec::new();
        for (label, _) in AXIS_CHANNELS {
            let index = registry.register(label, ChannelKind::Imu)?;
            // capacity matches the table length
            let _ = channels.push(index);
        }

        Ok(Self {
            sensor,
            state: SensorState::Uninitialized,
            channels,
            last_sample: None,
        })
    }

    /// Current lifecycle state
    pub fn sensor_state(&self) -> SensorState {
        self.state
    }

    /// Most recent published sample, if any cycle has produced one
    pub fn last_sample(&self) -> Option<&AxesSample> {
        self.last_sample.as_ref()
    }

    /// Access the underlying sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the underlying sensor
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Channel handle for one axis slot, in [`AXIS_CHANNELS`] order
    pub fn channel(&self, slot: usize) -> Option<ChannelIndex> {
        self.channels.get(slot).copied()
    }
}

impl<S: ImuSensor> PipelineNode for ImuAcquisition<S> {
    fn on_cycle(&mut self, frame: &mut SampleFrame) {
        // One handshake attempt per cycle until the sensor comes up
        if self.state == SensorState::Uninitialized {
            match self.sensor.initialize() {
                Ok(()) => {
                    self.state = SensorState::Ready;
                    crate::log_info!("IMU sensor ready");
                }
                Err(err) => {
                    crate::log_debug!("IMU init attempt failed: {}", err);
                }
            }
        }

        // A sensor that just came up is polled in the same cycle
        if self.state == SensorState::Ready {
            match self.sensor.read_axes() {
                Ok(Some(sample)) => {
                    self.last_sample = Some(sample);
                    for (index, (_, axis)) in self.channels.iter().zip(AXIS_CHANNELS) {
                        frame.write_sample(*index, sample.axis(axis));
                    }
                }
                Ok(None) => {
                    // No data ready; skip publication, slots stay unwritten
                }
                Err(err) => {
                    crate::log_warn!("IMU read failed: {}", err);
                }
            }
        }

        // Every cycle ends with an event sweep, whatever happened above
        frame.process_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::imu::MockImu;
    use nalgebra::Vector3;

    #[test]
    fn test_node_registers_nine_imu_channels() {
        let mut registry = ChannelRegistry::new();
        let node = ImuAcquisition::new(MockImu::new(), &mut registry).unwrap();

        assert_eq!(registry.count(), NUM_AXES);
        for (slot, (label, _)) in AXIS_CHANNELS.iter().enumerate() {
            let descriptor = registry.get(slot).unwrap();
            assert_eq!(descriptor.label, *label);
            assert_eq!(descriptor.kind, ChannelKind::Imu);
        }
        assert_eq!(node.sensor_state(), SensorState::Uninitialized);
        assert!(node.last_sample().is_none());
    }

    #[test]
    fn test_node_construction_fails_on_full_table() {
        let mut registry = ChannelRegistry::new();
        // Leave fewer than nine free slots
        for _ in 0..crate::pipeline::MAX_CHANNELS - 3 {
            registry.register("CH", ChannelKind::Aux).unwrap();
        }

        let result = ImuAcquisition::new(MockImu::new(), &mut registry);
        assert!(matches!(result, Err(PipelineError::ChannelTableFull)));
    }

    #[test]
    fn test_node_becomes_ready_and_publishes() {
        let mut registry = ChannelRegistry::new();
        let sample = AxesSample {
            accel: Vector3::new(0.1, 0.2, 9.8),
            gyro: Vector3::new(0.01, 0.02, 0.03),
            mag: Vector3::new(20.0, -5.0, 42.0),
        };
        let mut node =
            ImuAcquisition::new(MockImu::with_samples(&[sample]), &mut registry).unwrap();

        let mut frame = SampleFrame::new();
        node.on_cycle(&mut frame);

        assert_eq!(node.sensor_state(), SensorState::Ready);
        assert_eq!(frame.written_count(), NUM_AXES);

        // Values land in the slots named by the table
        let accel_x = node.channel(0).unwrap();
        let mag_z = node.channel(8).unwrap();
        assert!((frame.sample(accel_x).unwrap() - 0.1).abs() < 1e-6);
        assert!((frame.sample(mag_z).unwrap() - 42.0).abs() < 1e-6);
    }

    #[test]
    fn test_node_stays_uninitialized_until_handshake() {
        let mut registry = ChannelRegistry::new();
        let mut node =
            ImuAcquisition::new(MockImu::with_init_failures(1), &mut registry).unwrap();

        let mut frame = SampleFrame::new();
        node.on_cycle(&mut frame);
        assert_eq!(node.sensor_state(), SensorState::Uninitialized);
        assert_eq!(frame.written_count(), 0);

        node.on_cycle(&mut frame);
        assert_eq!(node.sensor_state(), SensorState::Ready);
    }
}
