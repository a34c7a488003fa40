//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They are the console side
//! channel; no decision ever depends on them.

use crate::error::{DisplayError, Error};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to run its first tick; relay confirmed off.
    Started {
        fallback_temperature_c: f32,
        fallback_humidity_pct: f32,
    },

    /// A fresh climate reading replaced the stored values.
    ClimateRefreshed { temperature_c: f32, humidity_pct: f32 },

    /// The climate read missed; the previous values stay in use.
    ClimateReadMissed { consecutive: u32 },

    /// Consecutive misses reached the configured warning threshold.
    ClimateStale { consecutive: u32 },

    /// Soil is wet; the pump stays off.
    SoilWet { temperature_c: f32 },

    /// Soil is dry; a pump pulse is starting.
    WateringStarted { duration_ms: u32 },

    /// The pump pulse finished and the relay is off.
    WateringDone,

    /// A frame could not be drawn and was skipped.
    DisplaySkipped(DisplayError),

    /// A tick aborted; the loop backs off for `backoff_ms` and continues.
    TickFailed { error: Error, backoff_ms: u32 },

    /// The loop left after a stop request.
    Stopped { ticks: u64, failed_ticks: u64 },
}
