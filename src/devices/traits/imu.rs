//! 9-axis sensor interface
//!
//! Device-independent interface for 9-axis IMU sensors as consumed by the
//! acquisition loop. Implementations hide all bus protocol detail behind two
//! operations: a one-shot handshake and a non-blocking polled read.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_source::devices::traits::ImuSensor;
//!
//! fn poll<S: ImuSensor>(sensor: &mut S) {
//!     match sensor.read_axes() {
//!         Ok(Some(sample)) => { /* publish sample.as_channel_values() */ }
//!         Ok(None) => { /* no fresh data this cycle */ }
//!         Err(_) => { /* bus fault, treat as no data */ }
//!     }
//! }
//! ```

use nalgebra::Vector3;

/// Number of scalar axes a 9-axis sample decomposes into
pub const NUM_AXES: usize = 9;

/// Failures a sensor implementation can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// I2C communication failed
    I2cError,

    /// Device identification register did not match (carries the id read)
    InvalidDevice(u8),

    /// Read attempted before a successful handshake
    NotInitialized,

    /// Device did not come back out of soft reset within the bounded wait
    ResetTimeout,
}

impl core::fmt::Display for ImuError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImuError::I2cError => write!(f, "I2C transaction failed"),
            ImuError::InvalidDevice(id) => write!(f, "unexpected device id 0x{:02X}", id),
            ImuError::NotInitialized => write!(f, "device not initialized"),
            ImuError::ResetTimeout => write!(f, "device did not leave reset"),
        }
    }
}

/// One scalar component of the 9-axis sample
///
/// The role half of the channel table: each published channel carries exactly
/// one of these, and [`AxesSample::axis`] maps a role back to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    AccelX,
    AccelY,
    AccelZ,
    GyroX,
    GyroY,
    GyroZ,
    MagX,
    MagY,
    MagZ,
}

/// One decoded 9-axis reading
///
/// All values are in SI units, body frame:
/// - Accelerometer: m/s² (includes gravity)
/// - Gyroscope: rad/s
/// - Magnetometer: µT
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesSample {
    /// Accelerometer triad: m/s²
    pub accel: Vector3<f32>,

    /// Gyroscope triad: rad/s
    pub gyro: Vector3<f32>,

    /// Magnetometer triad: µT
    pub mag: Vector3<f32>,
}

impl Default for AxesSample {
    fn default() -> Self {
        Self {
            accel: Vector3::new(0.0, 0.0, 9.80665), // 1g down, at rest
            gyro: Vector3::zeros(),
            mag: Vector3::zeros(),
        }
    }
}

impl AxesSample {
    /// Build a sample from the three triads
    pub fn new(accel: Vector3<f32>, gyro: Vector3<f32>, mag: Vector3<f32>) -> Self {
        Self { accel, gyro, mag }
    }

    /// Value of one axis role
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::AccelX => self.accel.x,
            Axis::AccelY => self.accel.y,
            Axis::AccelZ => self.accel.z,
            Axis::GyroX => self.gyro.x,
            Axis::GyroY => self.gyro.y,
            Axis::GyroZ => self.gyro.z,
            Axis::MagX => self.mag.x,
            Axis::MagY => self.mag.y,
            Axis::MagZ => self.mag.z,
        }
    }

    /// Flatten to the fixed channel order: accel xyz, gyro xyz, mag xyz
    pub fn as_channel_values(&self) -> [f32; NUM_AXES] {
        [
            self.accel.x,
            self.accel.y,
            self.accel.z,
            self.gyro.x,
            self.gyro.y,
            self.gyro.z,
            self.mag.x,
            self.mag.y,
            self.mag.z,
        ]
    }
}

impl From<[f32; NUM_AXES]> for AxesSample {
    fn from(v: [f32; NUM_AXES]) -> Self {
        Self {
            accel: Vector3::new(v[0], v[1], v[2]),
            gyro: Vector3::new(v[3], v[4], v[5]),
            mag: Vector3::new(v[6], v[7], v[8]),
        }
    }
}

/// Device-independent 9-axis sensor interface
///
/// This trait abstracts sensor hardware specifics, enabling:
/// - Testability with scripted implementations
/// - Construction-time selection of real bus vs simulated device
/// - Sensor upgrades without touching the acquisition loop
pub trait ImuSensor {
    /// Perform bus setup and the device handshake
    ///
    /// Returns `Ok(())` only once the device has acknowledged (identification
    /// register match and wake-up accepted). Any other outcome is an `Err`.
    /// Makes exactly one attempt; retry policy belongs to the caller. Internal
    /// waits are bounded, so a missing device returns promptly.
    fn initialize(&mut self) -> Result<(), ImuError>;

    /// Poll for a fresh reading
    ///
    /// Non-blocking: returns `Ok(None)` immediately when the device-side
    /// data-ready flag is clear. That is the expected common case at high
    /// poll rates, not an error. When data is ready, returns all nine decoded
    /// values from one register read.
    ///
    /// Calling this before a successful [`initialize`](Self::initialize)
    /// returns `Err(ImuError::NotInitialized)`.
    fn read_axes(&mut self) -> Result<Option<AxesSample>, ImuError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_default_is_at_rest() {
        let sample = AxesSample::default();
        assert_eq!(sample.gyro, Vector3::zeros());
        assert!((sample.accel.z - 9.80665).abs() < 0.001);
        assert_eq!(sample.mag, Vector3::zeros());
    }

    #[test]
    fn test_axis_accessor_matches_triads() {
        let sample = AxesSample::new(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        );

        assert_eq!(sample.axis(Axis::AccelX), 1.0);
        assert_eq!(sample.axis(Axis::AccelZ), 3.0);
        assert_eq!(sample.axis(Axis::GyroY), 5.0);
        assert_eq!(sample.axis(Axis::MagX), 7.0);
        assert_eq!(sample.axis(Axis::MagZ), 9.0);
    }

    #[test]
    fn test_channel_value_order() {
        let sample = AxesSample::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let values = sample.as_channel_values();

        assert_eq!(values, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(sample.accel, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.gyro, Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(sample.mag, Vector3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn test_error_display() {
        let mut buf = heapless::String::<64>::new();
        core::fmt::write(&mut buf, format_args!("{}", ImuError::InvalidDevice(0x12))).unwrap();
        assert_eq!(buf.as_str(), "unexpected device id 0x12");
    }
}
