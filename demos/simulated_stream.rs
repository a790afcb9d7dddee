//! Streams scripted samples through the acquisition node without hardware.
//!
//! The sensor fails its first two handshake attempts, then produces a short
//! synthetic motion profile. Watch the node report empty cycles, come up, and
//! publish into its channels.
//!
//! Run with: cargo run --example simulated_stream

use imu_source::acquisition::{ImuAcquisition, AXIS_CHANNELS};
use imu_source::devices::imu::MockImu;
use imu_source::devices::traits::AxesSample;
use imu_source::pipeline::{ChannelRegistry, PipelineError, PipelineNode, SampleFrame};
use nalgebra::Vector3;

const CYCLES: usize = 12;

fn scripted_sensor() -> MockImu {
    let mut imu = MockImu::with_init_failures(2);

    for step in 0..CYCLES {
        let t = step as f32 * 0.1;
        let sample = AxesSample {
            accel: Vector3::new(0.3 * t.sin(), 0.3 * t.cos(), 9.81),
            gyro: Vector3::new(0.02 * t.sin(), -0.01, 0.05 * t.cos()),
            mag: Vector3::new(22.0, -4.5, 41.0 + t),
        };
        let _ = imu.push_sample(sample);
        if step % 4 == 3 {
            // Sprinkle in a cycle where the sensor has nothing new
            let _ = imu.push_not_ready();
        }
    }

    imu
}

fn main() -> Result<(), PipelineError> {
    let mut registry = ChannelRegistry::new();
    let mut node = ImuAcquisition::new(scripted_sensor(), &mut registry)?;
    let mut frame = SampleFrame::new();

    println!("channels:");
    for descriptor in registry.iter() {
        println!("  {:?} {}", descriptor.kind, descriptor.label);
    }
    println!();

    for cycle in 1..=CYCLES {
        frame.clear();
        node.on_cycle(&mut frame);

        print!("cycle {cycle:2} [{:?}]", node.sensor_state());
        if frame.written_count() == 0 {
            println!("  (no data)");
            continue;
        }

        for (slot, (label, _)) in AXIS_CHANNELS.iter().enumerate() {
            if let Some(index) = node.channel(slot) {
                if let Some(value) = frame.sample(index) {
                    print!("  {label}={value:7.3}");
                }
            }
        }
        println!();
    }

    println!("\nevent sweeps: {}", frame.event_sweeps());
    Ok(())
}
