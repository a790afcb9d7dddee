//! End-to-end cycle behavior of the IMU acquisition node
//!
//! Drives `ImuAcquisition` through scripted sensor scenarios and audits the
//! host-visible contract: channel writes, lifecycle latching, and the
//! end-of-cycle event sweep.

use imu_source::acquisition::{ImuAcquisition, SensorState, AXIS_CHANNELS};
use imu_source::devices::imu::MockImu;
use imu_source::devices::traits::{AxesSample, NUM_AXES};
use imu_source::pipeline::{
    ChannelKind, ChannelRegistry, PipelineNode, SampleFrame, SpikeEvent, TtlEvent,
};

/// Snapshot the node's nine slots from the frame, in channel order
fn published(node: &ImuAcquisition<MockImu>, frame: &SampleFrame) -> [Option<f32>; NUM_AXES] {
    let mut values = [None; NUM_AXES];
    for (slot, value) in values.iter_mut().enumerate() {
        *value = frame.sample(node.channel(slot).unwrap());
    }
    values
}

#[test]
fn test_init_failures_produce_empty_cycles_then_recovery() {
    let mut imu = MockImu::with_init_failures(2);
    imu.push_sample(AxesSample::from([
        0.1, 0.2, 9.8, 0.01, 0.02, 0.03, 20.0, -5.0, 42.0,
    ]))
    .unwrap();

    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(imu, &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    // Cycles 1 and 2: handshake fails, nothing published, one attempt each
    for cycle in 1..=2 {
        frame.clear();
        node.on_cycle(&mut frame);
        assert_eq!(node.sensor_state(), SensorState::Uninitialized);
        assert_eq!(frame.written_count(), 0);
        assert_eq!(node.sensor().init_attempts(), cycle);
    }

    // Cycle 3: handshake succeeds and the same cycle publishes
    frame.clear();
    node.on_cycle(&mut frame);
    assert_eq!(node.sensor_state(), SensorState::Ready);
    assert_eq!(frame.written_count(), NUM_AXES);
    assert_eq!(node.sensor().init_attempts(), 3);

    let values = published(&node, &frame);
    assert!((values[0].unwrap() - 0.1).abs() < 1e-6);
    assert!((values[8].unwrap() - 42.0).abs() < 1e-6);

    // Cycle 4: no further handshake attempts once ready
    frame.clear();
    node.on_cycle(&mut frame);
    assert_eq!(node.sensor().init_attempts(), 3);
}

#[test]
fn test_ready_sensor_with_no_data_publishes_nothing() {
    // Empty script: initializes first try, then reports not-ready forever
    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(MockImu::new(), &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    for _ in 0..5 {
        frame.clear();
        node.on_cycle(&mut frame);
        assert_eq!(node.sensor_state(), SensorState::Ready);
        assert_eq!(frame.written_count(), 0);
    }

    assert_eq!(frame.event_sweeps(), 5);
    assert!(node.last_sample().is_none());
}

#[test]
fn test_consecutive_readings_publish_exactly() {
    let r1 = AxesSample::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    let r2 = AxesSample::from([9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

    let mut registry = ChannelRegistry::new();
    let mut node =
        ImuAcquisition::new(MockImu::with_samples(&[r1, r2]), &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    node.on_cycle(&mut frame);
    let first = published(&node, &frame);
    for (value, expected) in first.iter().zip(r1.as_channel_values()) {
        assert_eq!(value.unwrap(), expected);
    }

    frame.clear();
    node.on_cycle(&mut frame);
    let second = published(&node, &frame);
    for (value, expected) in second.iter().zip(r2.as_channel_values()) {
        assert_eq!(value.unwrap(), expected);
    }
}

#[test]
fn test_event_sweep_runs_exactly_once_per_cycle() {
    let mut imu = MockImu::with_init_failures(1);
    imu.push_sample(AxesSample::default()).unwrap();
    imu.push_not_ready().unwrap();
    imu.push_bus_fault().unwrap();

    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(imu, &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    // Failed init, data, not-ready, bus fault: one sweep each
    for expected_sweeps in 1..=4 {
        frame.clear();
        node.on_cycle(&mut frame);
        assert_eq!(frame.event_sweeps(), expected_sweeps);
    }
}

#[test]
fn test_read_error_is_transient() {
    let good = AxesSample::from([1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
    let later = AxesSample::from([4.0, 4.0, 4.0, 5.0, 5.0, 5.0, 6.0, 6.0, 6.0]);

    let mut imu = MockImu::new();
    imu.push_sample(good).unwrap();
    imu.push_bus_fault().unwrap();
    imu.push_sample(later).unwrap();

    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(imu, &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    node.on_cycle(&mut frame);
    assert_eq!(frame.written_count(), NUM_AXES);

    // Fault cycle: no writes, still ready, last sample untouched
    frame.clear();
    node.on_cycle(&mut frame);
    assert_eq!(frame.written_count(), 0);
    assert_eq!(node.sensor_state(), SensorState::Ready);
    assert_eq!(node.last_sample().unwrap().accel.x, 1.0);

    // Next good cycle publishes again
    frame.clear();
    node.on_cycle(&mut frame);
    assert_eq!(frame.written_count(), NUM_AXES);
    assert_eq!(node.last_sample().unwrap().accel.x, 4.0);
}

#[test]
fn test_no_data_cycle_leaves_existing_slots_alone() {
    let sample = AxesSample::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);

    let mut imu = MockImu::new();
    imu.push_sample(sample).unwrap();
    imu.push_not_ready().unwrap();

    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(imu, &mut registry).unwrap();
    let mut frame = SampleFrame::new();

    node.on_cycle(&mut frame);

    // Skip the host-side clear: a quiet cycle must not zero or overwrite
    node.on_cycle(&mut frame);
    let values = published(&node, &frame);
    for (slot, value) in values.iter().enumerate() {
        assert_eq!(value.unwrap(), (slot + 1) as f32);
    }
}

#[test]
fn test_event_hooks_pass_through() {
    let mut registry = ChannelRegistry::new();
    let mut node =
        ImuAcquisition::new(MockImu::with_samples(&[AxesSample::default()]), &mut registry)
            .unwrap();
    let mut frame = SampleFrame::new();
    node.on_cycle(&mut frame);

    let reads_before = node.sensor().read_calls();
    let mut document = imu_source::core::parameters::SettingsDocument::new();

    node.on_ttl_event(&TtlEvent {
        line: 2,
        state: true,
        sample_number: 1000,
    });
    node.on_spike(&SpikeEvent {
        channel: 7,
        sample_number: 2000,
    });
    node.on_broadcast("resync");
    node.update_settings();
    node.save_settings(&mut document);
    node.load_settings(&document);

    // Hooks neither touch the sensor nor record anything
    assert_eq!(node.sensor().read_calls(), reads_before);
    assert_eq!(node.sensor_state(), SensorState::Ready);
    assert!(node.last_sample().is_some());
    assert!(document.is_empty());
}

#[test]
fn test_channels_follow_the_axis_table() {
    let mut registry = ChannelRegistry::new();
    // Node channels sit after whatever the host registered before it
    registry.register("LFP 1", ChannelKind::Electrode).unwrap();
    registry.register("LFP 2", ChannelKind::Electrode).unwrap();

    let node = ImuAcquisition::new(MockImu::new(), &mut registry).unwrap();

    assert_eq!(registry.count(), 2 + NUM_AXES);
    for (slot, (label, _)) in AXIS_CHANNELS.iter().enumerate() {
        let index = node.channel(slot).unwrap();
        assert_eq!(index.slot(), 2 + slot);
        let descriptor = registry.get(index.slot()).unwrap();
        assert_eq!(descriptor.label, *label);
        assert_eq!(descriptor.kind, ChannelKind::Imu);
    }
}
