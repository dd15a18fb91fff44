//! Raw register reader for the MPU-6050 six-axis inertial sensor.
//!
//! No scaling or filtering: values come back exactly as the sensor's 16-bit
//! output registers hold them.

use embedded_hal::{delay::DelayNs, i2c::I2c};

/// Bus address with AD0 tied low.
pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_PWR_MGMT_1: u8 = 0x6B;
const PWR_DEVICE_RESET: u8 = 0x80;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // AX_H .. AZ_L
const REG_TEMP_OUT_H: u8 = 0x41;
const REG_GYRO_XOUT_H: u8 = 0x43; // GX_H .. GZ_L

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub temperature: i16,
}

impl RawSample {
    /// Die temperature, from the register map formula.
    pub fn temperature_celsius(&self) -> f32 {
        f32::from(self.temperature) / 340.0 + 36.53
    }
}

pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Does not touch the bus; call [`Mpu6050::reset`] before reading.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Resets every register, then clears the sleep bit the reset sets.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), I2C::Error> {
        self.i2c
            .write(self.address, &[REG_PWR_MGMT_1, PWR_DEVICE_RESET])?;
        delay.delay_ms(100);

        self.i2c.write(self.address, &[REG_PWR_MGMT_1, 0x00])?;
        delay.delay_ms(10);

        #[cfg(feature = "defmt")]
        defmt::debug!("mpu6050: awake at {=u8:#x}", self.address);

        Ok(())
    }

    /// Reads accelerometer, gyroscope and temperature. The register pointer
    /// auto-increments, so each block is one write-read from its first
    /// register.
    pub fn read_raw(&mut self) -> Result<RawSample, I2C::Error> {
        let mut buf = [0u8; 6];

        self.i2c
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut buf)?;
        let accel = decode_triple(&buf);

        self.i2c
            .write_read(self.address, &[REG_GYRO_XOUT_H], &mut buf)?;
        let gyro = decode_triple(&buf);

        let mut temp = [0u8; 2];
        self.i2c
            .write_read(self.address, &[REG_TEMP_OUT_H], &mut temp)?;

        Ok(RawSample {
            accel,
            gyro,
            temperature: i16::from_be_bytes(temp),
        })
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn decode_triple(buf: &[u8; 6]) -> [i16; 3] {
    [
        i16::from_be_bytes([buf[0], buf[1]]),
        i16::from_be_bytes([buf[2], buf[3]]),
        i16::from_be_bytes([buf[4], buf[5]]),
    ]
}
