//! Resistive soil moisture probe (FC-28 board, digital comparator output).
//!
//! The comparator's DO pin goes HIGH when probe resistance rises above the
//! trimpot threshold, i.e. when the soil is dry.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: reads the simulated level map (default LOW = wet).

use crate::drivers::hw_init;
use crate::error::SensorError;

/// Stateless view of the comparator pin; every call samples the pad.
pub struct SoilMoistureSensor {
    gpio: i32,
}

impl SoilMoistureSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// `Ok(true)` when the soil is dry.
    pub fn read(&self) -> Result<bool, SensorError> {
        let dry = hw_init::gpio_read(self.gpio);
        log::trace!("Soil probe GPIO{}: {}", self.gpio, if dry { "dry" } else { "wet" });
        Ok(dry)
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
