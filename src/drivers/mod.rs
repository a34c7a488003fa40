//! Sensor and actuator drivers, plus raw GPIO initialisation.

pub mod dht11;
pub mod hw_init;
pub mod relay;
pub mod soil;
