//! System configuration parameters
//!
//! All tunable parameters for the PlantCare controller.  Defaults come from
//! the board pin map in [`pins`](crate::pins); a JSON override can be baked
//! in at build time through the `PLANTCARE_CONFIG` environment variable.
//! Nothing is persisted at runtime.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Longest pump pulse accepted by [`PlantConfig::validate`].
pub const MAX_PUMP_DURATION_MS: u32 = 30_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    // --- Pins ---
    /// Relay output driving the pump.
    pub pump_relay_gpio: i32,
    /// Soil moisture comparator input (HIGH = dry).
    pub soil_sensor_gpio: i32,
    /// DHT11 data line.
    pub climate_sensor_gpio: i32,
    pub i2c_sda_gpio: i32,
    pub i2c_scl_gpio: i32,
    /// 7-bit I2C address of the status display.
    pub display_i2c_address: u8,

    // --- Timing ---
    /// How long one watering pulse keeps the pump on (milliseconds)
    pub pump_duration_ms: u32,
    /// Pause between control ticks (milliseconds)
    pub tick_interval_ms: u32,
    /// Extra pause after a failed tick before the loop resumes (milliseconds)
    pub recovery_delay_ms: u32,

    // --- Climate fallback ---
    /// Temperature shown until the first successful climate read (Celsius)
    pub fallback_temperature_c: f32,
    /// Humidity shown until the first successful climate read (%RH)
    pub fallback_humidity_pct: f32,
    /// Consecutive climate read failures before a stale-data warning is logged
    pub stale_warning_after: u32,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            // Pins
            pump_relay_gpio: pins::PUMP_RELAY_GPIO,
            soil_sensor_gpio: pins::SOIL_SENSOR_GPIO,
            climate_sensor_gpio: pins::CLIMATE_SENSOR_GPIO,
            i2c_sda_gpio: pins::I2C_SDA_GPIO,
            i2c_scl_gpio: pins::I2C_SCL_GPIO,
            display_i2c_address: pins::DISPLAY_I2C_ADDRESS,

            // Timing
            pump_duration_ms: 2_000,
            tick_interval_ms: 2_000,
            recovery_delay_ms: 1_000,

            // Climate fallback
            fallback_temperature_c: 24.0,
            fallback_humidity_pct: 50.0,
            stale_warning_after: 10,
        }
    }
}

impl PlantConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their
    /// defaults.  The result is validated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON override"))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the build-time `PLANTCARE_CONFIG` override when present.
    pub fn load() -> Result<Self> {
        match option_env!("PLANTCARE_CONFIG") {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    /// Reject values that would make the loop spin, flood the plant, or
    /// show nonsense before the first climate read.
    pub fn validate(&self) -> Result<()> {
        if self.pump_duration_ms == 0 {
            return Err(Error::Config("pump_duration_ms must be > 0"));
        }
        if self.pump_duration_ms > MAX_PUMP_DURATION_MS {
            return Err(Error::Config("pump_duration_ms exceeds 30 s"));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be > 0"));
        }
        if self.recovery_delay_ms == 0 {
            return Err(Error::Config("recovery_delay_ms must be > 0"));
        }
        if !self.fallback_temperature_c.is_finite()
            || !(-40.0..=80.0).contains(&self.fallback_temperature_c)
        {
            return Err(Error::Config("fallback_temperature_c out of range"));
        }
        if !self.fallback_humidity_pct.is_finite()
            || !(0.0..=100.0).contains(&self.fallback_humidity_pct)
        {
            return Err(Error::Config("fallback_humidity_pct out of range"));
        }
        if self.display_i2c_address > 0x7F {
            return Err(Error::Config("display_i2c_address is not a 7-bit address"));
        }
        let outputs = [self.pump_relay_gpio, self.climate_sensor_gpio, self.i2c_sda_gpio, self.i2c_scl_gpio];
        if outputs.iter().any(|&pin| pin == self.soil_sensor_gpio)
            || self.pump_relay_gpio == self.climate_sensor_gpio
            || self.i2c_sda_gpio == self.i2c_scl_gpio
        {
            return Err(Error::Config("GPIO assigned twice"));
        }
        Ok(())
    }

    pub fn pump_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.pump_duration_ms))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    pub fn recovery_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.recovery_delay_ms))
    }
}
