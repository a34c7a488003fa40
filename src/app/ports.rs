//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (sensors, relay, screen, clock, event sinks) implement
//! these traits.  The [`ControlLoop`](super::service::ControlLoop) consumes
//! them via generics, so the domain core never touches hardware directly.
//!
//! All port errors are typed; the control loop decides per variant whether
//! a failure is absorbed or aborts the tick.

use core::time::Duration;

use crate::error::{ActuatorError, DisplayError, SensorError};

use super::state::{ClimateSample, StatusSnapshot};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port.  Implementations hold no "last good" memory; that
/// belongs to the control loop.
pub trait SensorPort {
    /// Attempt one temperature/humidity reading.
    ///
    /// Misses are common on DHT-class sensors and are reported as
    /// [`SensorError::Transient`].
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError>;

    /// Sample the soil probe.  `true` = dry, `false` = wet.
    fn read_moisture(&mut self) -> Result<bool, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the pump relay.
pub trait ActuatorPort {
    /// Switch the pump relay.  Idempotent.
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError>;

    /// Last commanded relay state.
    fn is_pump_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → screen)
// ───────────────────────────────────────────────────────────────

/// Full-frame status screen.  Every call redraws all three lines.
pub trait DisplayPort {
    fn render(&mut self, snapshot: &StatusSnapshot) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ time)
// ───────────────────────────────────────────────────────────────

/// Blocking sleeps and monotonic uptime.  Tests substitute a simulated
/// clock so a day of ticks runs in microseconds.
pub trait Clock {
    /// Block the calling context for `duration`.
    fn sleep(&mut self, duration: Duration);

    /// Time since boot.
    fn uptime(&self) -> Duration;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
