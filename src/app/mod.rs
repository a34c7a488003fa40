//! Application core — pure domain logic, zero I/O.
//!
//! The watering decision, last-good climate memory, and pump pulse timing
//! live here.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod actuation;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
