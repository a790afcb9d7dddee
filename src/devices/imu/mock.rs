//! Mock IMU implementation
//!
//! Provides a configurable scripted sensor that implements the `ImuSensor`
//! trait: initialization outcomes and per-cycle read outcomes are queued up
//! front. Serves both as the test double for the acquisition loop and as the
//! simulated device on platforms without a sensor bus.
//!
//! ## Usage
//!
//! ```ignore
//! use imu_source::devices::imu::MockImu;
//! use imu_source::devices::traits::{AxesSample, ImuSensor};
//!
//! // Fails the first two handshake attempts, then comes up
//! let mut imu = MockImu::with_init_failures(2);
//!
//! // Scripted cycle outcomes
//! imu.push_sample(AxesSample::default()).unwrap();
//! imu.push_not_ready().unwrap();
//! ```

use crate::devices::traits::{AxesSample, ImuError, ImuSensor};

/// One scripted `read_axes` outcome
#[derive(Debug, Clone, Copy)]
pub enum ReadOutcome {
    /// A fresh reading is available this cycle
    Sample(AxesSample),
    /// Device not ready this cycle
    NotReady,
    /// Bus fault while reading
    BusFault,
}

/// Scripted simulated 9-axis sensor
///
/// With an empty script the device initializes on the first attempt and
/// reports "not ready" forever, which is the quiet baseline most tests want.
pub struct MockImu {
    /// Queue of read outcomes to play back
    outcomes: heapless::Deque<ReadOutcome, 64>,

    /// Remaining initialize() attempts that fail before one succeeds
    init_failures: u32,

    /// Number of initialize() attempts observed
    init_attempts: u32,

    /// Number of read_axes() calls observed
    read_calls: u32,

    /// Handshake completed
    initialized: bool,
}

impl Default for MockImu {
    fn default() -> Self {
        Self::new()
    }
}

impl MockImu {
    /// Create a mock that initializes immediately and has nothing to report
    pub fn new() -> Self {
        Self {
            outcomes: heapless::Deque::new(),
            init_failures: 0,
            init_attempts: 0,
            read_calls: 0,
            initialized: false,
        }
    }

    /// Create a mock whose first `failures` handshake attempts fail
    pub fn with_init_failures(failures: u32) -> Self {
        let mut imu = Self::new();
        imu.init_failures = failures;
        imu
    }

    /// Create a mock with a sequence of samples, one per cycle
    pub fn with_samples(samples: &[AxesSample]) -> Self {
        let mut imu = Self::new();
        for sample in samples.iter().take(64) {
            let _ = imu.outcomes.push_back(ReadOutcome::Sample(*sample));
        }
        imu
    }

    /// Queue a fresh reading for the next unscripted cycle
    pub fn push_sample(&mut self, sample: AxesSample) -> Result<(), ReadOutcome> {
        self.outcomes.push_back(ReadOutcome::Sample(sample))
    }

    /// Queue a not-ready cycle
    pub fn push_not_ready(&mut self) -> Result<(), ReadOutcome> {
        self.outcomes.push_back(ReadOutcome::NotReady)
    }

    /// Queue a bus fault
    pub fn push_bus_fault(&mut self) -> Result<(), ReadOutcome> {
        self.outcomes.push_back(ReadOutcome::BusFault)
    }

    /// Make the next `failures` handshake attempts fail
    pub fn set_init_failures(&mut self, failures: u32) {
        self.init_failures = failures;
    }

    /// Number of handshake attempts made so far
    pub fn init_attempts(&self) -> u32 {
        self.init_attempts
    }

    /// Number of read calls made so far
    pub fn read_calls(&self) -> u32 {
        self.read_calls
    }

    /// Whether the handshake has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl ImuSensor for MockImu {
    fn initialize(&mut self) -> Result<(), ImuError> {
        self.init_attempts += 1;

        if self.init_failures > 0 {
            self.init_failures -= 1;
            return Err(ImuError::I2cError);
        }

        self.initialized = true;
        Ok(())
    }

    fn read_axes(&mut self) -> Result<Option<AxesSample>, ImuError> {
        self.read_calls += 1;

        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }

        match self.outcomes.pop_front() {
            Some(ReadOutcome::Sample(sample)) => Ok(Some(sample)),
            Some(ReadOutcome::NotReady) | None => Ok(None),
            Some(ReadOutcome::BusFault) => Err(ImuError::I2cError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_mock_initializes_first_try() {
        let mut imu = MockImu::new();
        assert!(imu.initialize().is_ok());
        assert!(imu.is_initialized());
        assert_eq!(imu.init_attempts(), 1);
    }

    #[test]
    fn test_mock_scripted_init_failures() {
        let mut imu = MockImu::with_init_failures(2);

        assert_eq!(imu.initialize(), Err(ImuError::I2cError));
        assert_eq!(imu.initialize(), Err(ImuError::I2cError));
        assert!(imu.initialize().is_ok());
        assert_eq!(imu.init_attempts(), 3);
    }

    #[test]
    fn test_mock_read_before_init() {
        let mut imu = MockImu::new();
        assert_eq!(imu.read_axes(), Err(ImuError::NotInitialized));
    }

    #[test]
    fn test_mock_plays_back_samples_in_order() {
        let s1 = AxesSample {
            gyro: Vector3::new(0.1, 0.2, 0.3),
            ..Default::default()
        };
        let s2 = AxesSample {
            gyro: Vector3::new(0.4, 0.5, 0.6),
            ..Default::default()
        };
        let mut imu = MockImu::with_samples(&[s1, s2]);
        imu.initialize().unwrap();

        let r1 = imu.read_axes().unwrap().unwrap();
        let r2 = imu.read_axes().unwrap().unwrap();
        assert!((r1.gyro.x - 0.1).abs() < 1e-6);
        assert!((r2.gyro.x - 0.4).abs() < 1e-6);

        // Script exhausted: device goes quiet rather than repeating
        assert_eq!(imu.read_axes(), Ok(None));
    }

    #[test]
    fn test_mock_not_ready_and_fault_outcomes() {
        let mut imu = MockImu::new();
        imu.initialize().unwrap();

        imu.push_not_ready().unwrap();
        imu.push_bus_fault().unwrap();
        imu.push_sample(AxesSample::default()).unwrap();

        assert_eq!(imu.read_axes(), Ok(None));
        assert_eq!(imu.read_axes(), Err(ImuError::I2cError));
        assert!(imu.read_axes().unwrap().is_some());
        assert_eq!(imu.read_calls(), 3);
    }
}
