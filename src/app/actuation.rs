//! Timed pump pulses.
//!
//! A pulse switches the relay on, blocks for the requested duration and
//! switches it off again.  The off-transition is owned by [`PumpOnGuard`],
//! so it runs on every exit path: a failed switch-on, an early `?` return,
//! or a panic unwinding out of the sleep.

use core::time::Duration;

use log::{error, info};

use crate::error::ActuatorError;

use super::ports::{ActuatorPort, Clock};

/// Holds the pump on for as long as it lives.
pub struct PumpOnGuard<'a, A: ActuatorPort + ?Sized> {
    actuator: &'a mut A,
    released: bool,
}

impl<'a, A: ActuatorPort + ?Sized> PumpOnGuard<'a, A> {
    /// Switch the pump on.  If switching fails the guard is dropped on the
    /// way out, which still commands the relay off.
    pub fn engage(actuator: &'a mut A) -> Result<Self, ActuatorError> {
        let guard = Self {
            actuator,
            released: false,
        };
        guard.actuator.set_pump(true)?;
        Ok(guard)
    }

    /// Switch the pump off and report the outcome.
    pub fn release(mut self) -> Result<(), ActuatorError> {
        self.released = true;
        self.actuator.set_pump(false)
    }
}

impl<A: ActuatorPort + ?Sized> Drop for PumpOnGuard<'_, A> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.actuator.set_pump(false) {
            error!("Pump guard: relay off failed ({}), pump state unknown", e);
        }
    }
}

/// Run the pump for `duration`, then switch it off unconditionally.
pub fn pulse<A, C>(actuator: &mut A, duration: Duration, clock: &mut C) -> Result<(), ActuatorError>
where
    A: ActuatorPort + ?Sized,
    C: Clock + ?Sized,
{
    let guard = PumpOnGuard::engage(actuator)?;
    info!("Pump ON for {} ms", duration.as_millis());
    clock.sleep(duration);
    guard.release()?;
    info!("Pump OFF");
    Ok(())
}
