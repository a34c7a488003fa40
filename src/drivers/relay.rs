//! Pump relay driver (SRD-05VDC module on a digital output).
//!
//! Single-channel on/off control; HIGH closes the relay and runs the pump.
//!
//! ## Safety contract
//!
//! The relay is driven LOW when the driver is constructed and again when it
//! is dropped, so neither a fresh boot nor an orderly teardown can leave the
//! pump running.  Pulse timing lives in
//! [`actuation`](crate::app::actuation); this driver is a dumb actuator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real pad via hw_init helpers.
//! On host/test: writes the simulated level map.

use log::{error, warn};

use crate::drivers::hw_init;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Open,
    Closed,
}

pub struct RelayDriver {
    gpio: i32,
    state: RelayState,
}

impl RelayDriver {
    /// Take ownership of the relay pad and force it open.
    pub fn new(gpio: i32) -> Self {
        let mut relay = Self {
            gpio,
            state: RelayState::Open,
        };
        if let Err(e) = relay.set(false) {
            warn!("Relay GPIO{}: initial open failed ({})", gpio, e);
        }
        relay
    }

    pub fn set(&mut self, closed: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.gpio, closed).map_err(ActuatorError::GpioWriteFailed)?;
        self.state = if closed {
            RelayState::Closed
        } else {
            RelayState::Open
        };
        Ok(())
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, RelayState::Closed)
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl Drop for RelayDriver {
    fn drop(&mut self) {
        if let Err(e) = self.set(false) {
            error!("Relay GPIO{}: open on drop failed ({})", self.gpio, e);
        }
    }
}
