//! Blocking I2C driver for the ICM-20948
//!
//! Talks to the device's banked register map over any
//! `embedded_hal::i2c::I2c` bus, with an `embedded_hal::delay::DelayNs`
//! provider covering the timed steps of the bring-up sequence. The AK09916
//! magnetometer inside the package is addressed directly once the bypass
//! multiplexer is open.

use super::config::{Icm20948Config, RegisterBank};
use super::registers;
use crate::devices::traits::{AxesSample, ImuError, ImuSensor};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use nalgebra::Vector3;

/// Upper bound on 1 ms polls while waiting for the reset bit to clear
const RESET_POLL_LIMIT: u32 = 100;

/// ICM-20948 9-axis IMU behind a blocking I2C bus
///
/// Implements [`ImuSensor`]: one bounded handshake attempt per
/// `initialize` call, then data-ready-gated reads. Generic over the bus
/// (`embedded_hal::i2c::I2c`) and the delay source (`DelayNs`).
pub struct Icm20948<I2C, D> {
    /// Owned bus handle
    i2c: I2C,

    /// Delay source for the timed bring-up steps
    delay: D,

    /// Settings the driver was constructed with
    config: Icm20948Config,

    /// LSB-to-rad/s factor for the configured gyro range
    gyro_scale: f32,

    /// LSB-to-m/s² factor for the configured accel range
    accel_scale: f32,

    /// Bank the device is believed to have selected
    current_bank: RegisterBank,

    /// Handshake complete flag
    initialized: bool,

    /// Most recent valid magnetometer triad (µT)
    ///
    /// The AK09916 free-runs in continuous mode, so a cycle where its data
    /// is unreadable or overflowed keeps the previous field value instead of
    /// reporting zeros.
    last_mag: Vector3<f32>,
}

impl<I2C, D> Icm20948<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new ICM-20948 driver (uninitialized)
    ///
    /// Call [`ImuSensor::initialize`] before reading.
    pub fn new(i2c: I2C, delay: D, config: Icm20948Config) -> Self {
        Self {
            i2c,
            delay,
            config,
            gyro_scale: config.gyro_range.scale_to_rad_s(),
            accel_scale: config.accel_range.scale_to_m_s2(),
            current_bank: RegisterBank::Bank0,
            initialized: false,
            last_mag: Vector3::zeros(),
        }
    }

    /// Run the full handshake and bring-up sequence
    ///
    /// 1. Verify WHO_AM_I
    /// 2. Reset the device and wait (bounded) for the reset bit to clear
    /// 3. Wake with auto clock select, enable all sensors
    /// 4. Configure gyro/accel ranges, filters, and rate dividers
    /// 5. Enable I2C bypass and bring up the AK09916
    ///
    /// Makes exactly one attempt: any bus fault or identity mismatch aborts
    /// with an error and leaves the driver uninitialized.
    pub fn init(&mut self) -> Result<(), ImuError> {
        // The device may be in any bank after a partial previous attempt,
        // so force bank 0 rather than trusting the cache.
        self.write_register_direct(registers::REG_BANK_SEL, registers::BANK_0)?;
        self.current_bank = RegisterBank::Bank0;

        let whoami = self.read_register(registers::WHO_AM_I)?;
        if whoami != registers::ICM20948_WHO_AM_I_VALUE {
            crate::log_error!(
                "WHO_AM_I readback {:#x}, wanted {:#x}",
                whoami,
                registers::ICM20948_WHO_AM_I_VALUE
            );
            return Err(ImuError::InvalidDevice(whoami));
        }
        crate::log_info!("ICM-20948 present at {:#x}", self.config.i2c_address);

        // Reset, then poll until the reset bit clears. The device can NACK
        // while restarting, so read faults during the poll count as "not yet".
        self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_DEVICE_RESET)?;
        self.current_bank = RegisterBank::Bank0;

        let mut settled = false;
        for _ in 0..RESET_POLL_LIMIT {
            self.delay.delay_ms(1);
            match self.read_register(registers::PWR_MGMT_1) {
                Ok(pwr) if pwr & registers::PWR_MGMT_1_DEVICE_RESET == 0 => {
                    settled = true;
                    break;
                }
                _ => {}
            }
        }
        if !settled {
            crate::log_error!("ICM-20948 did not leave reset");
            return Err(ImuError::ResetTimeout);
        }

        // Wake up with auto clock select
        self.write_register(registers::PWR_MGMT_1, registers::PWR_MGMT_1_CLKSEL_AUTO)?;
        self.delay.delay_ms(10);

        // Enable all sensors
        self.write_register(registers::PWR_MGMT_2, registers::PWR_MGMT_2_ENABLE_ALL)?;

        // Configure gyroscope and accelerometer (Bank 2)
        self.select_bank(RegisterBank::Bank2)?;

        self.write_register(registers::ODR_ALIGN_EN, 0x01)?;

        self.write_register(registers::GYRO_SMPLRT_DIV, self.config.gyro_sample_rate_div)?;
        let gyro_config =
            self.config.gyro_range.register_value() | self.config.gyro_dlpf.register_value();
        self.write_register(registers::GYRO_CONFIG_1, gyro_config)?;

        // Accel sample rate divider is 12-bit, split across two registers
        self.write_register(
            registers::ACCEL_SMPLRT_DIV_1,
            ((self.config.accel_sample_rate_div >> 8) & 0x0F) as u8,
        )?;
        self.write_register(
            registers::ACCEL_SMPLRT_DIV_2,
            (self.config.accel_sample_rate_div & 0xFF) as u8,
        )?;
        let accel_config =
            self.config.accel_range.register_value() | self.config.accel_dlpf.register_value();
        self.write_register(registers::ACCEL_CONFIG, accel_config)?;

        // Back to Bank 0 for bypass setup and data access
        self.select_bank(RegisterBank::Bank0)?;

        // Disable I2C master mode (required for bypass), then open the bypass
        self.write_register(registers::USER_CTRL, 0x00)?;
        self.delay.delay_ms(10);
        self.write_register(registers::INT_PIN_CFG, registers::INT_PIN_CFG_BYPASS_EN)?;
        self.delay.delay_ms(10);

        let int_cfg = self.read_register(registers::INT_PIN_CFG)?;
        if (int_cfg & registers::INT_PIN_CFG_BYPASS_EN) == 0 {
            crate::log_error!("Bypass enable did not stick (INT_PIN_CFG: {:#x})", int_cfg);
            return Err(ImuError::NotInitialized);
        }
        crate::log_debug!("I2C bypass open, AK09916 visible on the bus");

        self.init_magnetometer()?;

        self.initialized = true;
        crate::log_info!("ICM-20948 bring-up complete");

        Ok(())
    }

    /// Switch the active register bank
    ///
    /// Skips the bus write when the cached selection already matches.
    fn select_bank(&mut self, bank: RegisterBank) -> Result<(), ImuError> {
        if self.current_bank != bank {
            // Reachable at the same address from every bank
            self.write_register_direct(registers::REG_BANK_SEL, bank.register_value())?;
            self.current_bank = bank;
        }
        Ok(())
    }

    /// Write a register on the ICM-20948 (no bank check)
    fn write_register_direct(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.i2c
            .write(self.config.i2c_address, &[reg, value])
            .map_err(|_| ImuError::I2cError)
    }

    /// Write a register on the ICM-20948 (assumes correct bank is selected)
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.write_register_direct(reg, value)
    }

    /// Read a register from the ICM-20948 (assumes correct bank is selected)
    fn read_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.config.i2c_address, &[reg], &mut buf)
            .map_err(|_| ImuError::I2cError)?;
        Ok(buf[0])
    }

    /// Read multiple bytes from the ICM-20948 starting at `reg`
    fn read_bytes(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        self.i2c
            .write_read(self.config.i2c_address, &[reg], buf)
            .map_err(|_| ImuError::I2cError)
    }

    /// Check if the handshake has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bus address the driver talks to
    pub fn address(&self) -> u8 {
        self.config.i2c_address
    }

    /// Settings the driver was constructed with
    pub fn config(&self) -> &Icm20948Config {
        &self.config
    }

    /// Cached bank selection
    pub fn current_bank(&self) -> RegisterBank {
        self.current_bank
    }

    // =========================================================================
    // Data Path
    // =========================================================================

    /// Check the raw-data-ready flag (Bank 0)
    ///
    /// Reading INT_STATUS_1 clears the flag on the device, so a `true` here
    /// must be followed by the data read.
    fn data_ready(&mut self) -> Result<bool, ImuError> {
        let status = self.read_register(registers::INT_STATUS_1)?;
        Ok(status & registers::INT_STATUS_1_RAW_DATA_0_RDY != 0)
    }

    /// Read raw accelerometer and gyroscope data (12 bytes, one transaction)
    ///
    /// Returns (accel_raw, gyro_raw) in register order: the burst window
    /// covers ACCEL_XOUT_H through GYRO_ZOUT_L as big-endian i16 pairs.
    fn read_accel_gyro_raw(&mut self) -> Result<([i16; 3], [i16; 3]), ImuError> {
        let mut buf = [0u8; 12];
        self.read_bytes(registers::ACCEL_XOUT_H, &mut buf)?;

        let mut words = [0i16; 6];
        for (i, word) in words.iter_mut().enumerate() {
            *word = i16::from_be_bytes([buf[2 * i], buf[2 * i + 1]]);
        }

        Ok(([words[0], words[1], words[2]], [words[3], words[4], words[5]]))
    }

    /// Fetch the latest magnetometer triad, falling back to the previous one
    ///
    /// The AK09916 data registers always hold its latest completed
    /// measurement, so the magnetometer rides along with accel/gyro
    /// readiness. A bus fault, a cleared DRDY, or a magnetic overflow each
    /// keep the previous triad.
    fn read_mag_latest(&mut self) -> Vector3<f32> {
        // Layout: ST1, HXL..HZH, dummy, ST2. Reading through ST2 completes
        // the measurement and re-arms DRDY.
        let mut buf = [0u8; 9];
        if self
            .i2c
            .write_read(registers::AK09916_ADDR, &[registers::AK09916_ST1], &mut buf)
            .is_err()
        {
            return self.last_mag;
        }

        let fresh = buf[0] & registers::AK09916_ST1_DRDY != 0;
        let overflow = buf[8] & registers::AK09916_ST2_HOFL != 0;
        if !fresh || overflow {
            return self.last_mag;
        }

        // AK09916 data is little-endian
        let raw = [
            i16::from_le_bytes([buf[1], buf[2]]),
            i16::from_le_bytes([buf[3], buf[4]]),
            i16::from_le_bytes([buf[5], buf[6]]),
        ];
        self.last_mag = self.convert_mag(raw);
        self.last_mag
    }

    // =========================================================================
    // Unit Conversion
    // =========================================================================

    /// Convert raw gyroscope values to rad/s
    pub fn convert_gyro(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * self.gyro_scale
    }

    /// Convert raw accelerometer values to m/s²
    pub fn convert_accel(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * self.accel_scale
    }

    /// Convert raw magnetometer values to µT
    pub fn convert_mag(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * registers::MAG_SENSITIVITY
    }

    // =========================================================================
    // AK09916 Access
    // =========================================================================

    /// Bring up the AK09916 magnetometer
    ///
    /// Runs after the bypass multiplexer is open, when the AK09916 answers
    /// at its own address on the host bus.
    fn init_magnetometer(&mut self) -> Result<(), ImuError> {
        let whoami = self.read_mag_register(registers::AK09916_WIA2)?;
        if whoami != registers::AK09916_WHO_AM_I_VALUE {
            crate::log_error!(
                "WIA2 readback {:#x}, wanted {:#x}",
                whoami,
                registers::AK09916_WHO_AM_I_VALUE
            );
            return Err(ImuError::InvalidDevice(whoami));
        }
        crate::log_info!("AK09916 magnetometer online");

        // Soft reset, then select the configured measurement mode
        self.write_mag_register(registers::AK09916_CNTL3, registers::AK09916_CNTL3_SRST)?;
        self.delay.delay_ms(10);
        self.write_mag_register(registers::AK09916_CNTL2, self.config.mag_mode.register_value())?;
        self.delay.delay_ms(10);

        Ok(())
    }

    /// Single-register read on the magnetometer
    fn read_mag_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(registers::AK09916_ADDR, &[reg], &mut buf)
            .map_err(|_| ImuError::I2cError)?;
        Ok(buf[0])
    }

    /// Single-register write on the magnetometer
    fn write_mag_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.i2c
            .write(registers::AK09916_ADDR, &[reg, value])
            .map_err(|_| ImuError::I2cError)
    }
}

// =============================================================================
// ImuSensor Implementation
// =============================================================================

impl<I2C, D> ImuSensor for Icm20948<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn initialize(&mut self) -> Result<(), ImuError> {
        self.init()
    }

    /// Poll for a fresh 9-axis sample
    ///
    /// Gated on the raw-data-ready flag: returns `Ok(None)` without touching
    /// the data registers when nothing new has landed. When ready, decodes
    /// accel (m/s²), gyro (rad/s), and the ride-along magnetometer (µT).
    fn read_axes(&mut self) -> Result<Option<AxesSample>, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }

        // Sensor data and the status flag live in Bank 0
        self.select_bank(RegisterBank::Bank0)?;

        if !self.data_ready()? {
            return Ok(None);
        }

        let (accel_raw, gyro_raw) = self.read_accel_gyro_raw()?;
        let mag = self.read_mag_latest();

        Ok(Some(AxesSample {
            accel: self.convert_accel(accel_raw),
            gyro: self.convert_gyro(gyro_raw),
            mag,
        }))
    }
}

// =============================================================================
// Tests
// =============================================================================
