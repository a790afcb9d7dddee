//! Streams live ICM-20948 data on a Linux I2C bus.
//!
//! The node brings the sensor up lazily, so this works even when the device
//! is plugged in after the stream starts: cycles stay empty until the
//! handshake succeeds, then samples flow.
//!
//! Run with: cargo run --example icm20948_stream [/dev/i2c-1]

use std::error::Error;
use std::thread;
use std::time::Duration;

use linux_embedded_hal::{Delay, I2cdev};

use imu_source::acquisition::ImuAcquisition;
use imu_source::devices::imu::icm20948::{Icm20948, Icm20948Config};
use imu_source::pipeline::{ChannelRegistry, PipelineNode, SampleFrame};

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/i2c-1".to_string());

    let i2c = I2cdev::new(&path)?;
    let driver = Icm20948::new(i2c, Delay, Icm20948Config::default());

    let mut registry = ChannelRegistry::new();
    let mut node =
        ImuAcquisition::new(driver, &mut registry).map_err(|e| e.to_string())?;
    let mut frame = SampleFrame::new();

    println!("streaming from {path} (ctrl-c to stop)");

    loop {
        frame.clear();
        node.on_cycle(&mut frame);

        if let Some(sample) = node.last_sample() {
            if frame.written_count() > 0 {
                println!(
                    "accel [{:6.2} {:6.2} {:6.2}] m/s²  gyro [{:6.3} {:6.3} {:6.3}] rad/s  mag [{:6.1} {:6.1} {:6.1}] µT",
                    sample.accel.x, sample.accel.y, sample.accel.z,
                    sample.gyro.x, sample.gyro.y, sample.gyro.z,
                    sample.mag.x, sample.mag.y, sample.mag.z,
                );
            }
        }

        thread::sleep(Duration::from_millis(10));
    }
}
