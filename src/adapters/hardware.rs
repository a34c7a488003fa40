//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the DHT11, soil probe and relay drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Together with the OLED adapter this
//! is the only code that touches actual hardware.  On non-espidf targets
//! the GPIO drivers use the simulated level map.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::app::state::ClimateSample;
use crate::drivers::dht11::Dht11;
use crate::drivers::relay::RelayDriver;
use crate::drivers::soil::SoilMoistureSensor;
use crate::error::{ActuatorError, SensorError};

/// Concrete adapter that combines all GPIO hardware behind port traits.
pub struct HardwareAdapter<P, D> {
    climate: Dht11<P, D>,
    soil: SoilMoistureSensor,
    relay: RelayDriver,
}

impl<P, D> HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(climate: Dht11<P, D>, soil: SoilMoistureSensor, relay: RelayDriver) -> Self {
        Self {
            climate,
            soil,
            relay,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D> SensorPort for HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        self.climate.read().map_err(|e| {
            debug!("DHT11: {}", e);
            SensorError::from(e)
        })
    }

    fn read_moisture(&mut self) -> Result<bool, SensorError> {
        self.soil.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P, D> ActuatorPort for HardwareAdapter<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.relay.set(on)
    }

    fn is_pump_on(&self) -> bool {
        self.relay.is_closed()
    }
}
