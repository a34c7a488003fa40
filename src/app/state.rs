//! Loop state and the values that flow through one control tick.
//!
//! [`LoopState`] is the "last known good" memory of the controller.  It
//! lives exactly as long as the [`ControlLoop`](super::service::ControlLoop)
//! that owns it and is only written after a successful climate read.

use core::fmt::{self, Write};
use core::time::Duration;

use heapless::String;

use crate::config::PlantConfig;

/// Capacity of one rendered display line.
pub const LINE_CAPACITY: usize = 32;

// ---------------------------------------------------------------------------
// Climate sample (one successful sensor read)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

// ---------------------------------------------------------------------------
// LoopState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    last_temperature_c: f32,
    last_humidity_pct: f32,
    /// Uptime of the last successful climate read; `None` while still on
    /// the fallback constants.
    last_good_at: Option<Duration>,
    consecutive_climate_failures: u32,
}

impl LoopState {
    /// Seed the state with the configured fallback constants.
    pub fn new(config: &PlantConfig) -> Self {
        Self {
            last_temperature_c: config.fallback_temperature_c,
            last_humidity_pct: config.fallback_humidity_pct,
            last_good_at: None,
            consecutive_climate_failures: 0,
        }
    }

    /// Overwrite the last good climate values.
    pub fn record_success(&mut self, sample: ClimateSample, at: Duration) {
        self.last_temperature_c = sample.temperature_c;
        self.last_humidity_pct = sample.humidity_pct;
        self.last_good_at = Some(at);
        self.consecutive_climate_failures = 0;
    }

    /// Count a failed read; the stored values are left untouched.
    /// Returns the new consecutive failure count.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_climate_failures = self.consecutive_climate_failures.saturating_add(1);
        self.consecutive_climate_failures
    }

    pub fn temperature_c(&self) -> f32 {
        self.last_temperature_c
    }

    pub fn humidity_pct(&self) -> f32 {
        self.last_humidity_pct
    }

    pub fn last_good_at(&self) -> Option<Duration> {
        self.last_good_at
    }

    pub fn consecutive_climate_failures(&self) -> u32 {
        self.consecutive_climate_failures
    }

    /// `true` until the first successful climate read.
    pub fn is_fallback(&self) -> bool {
        self.last_good_at.is_none()
    }
}

// ---------------------------------------------------------------------------
// Reading (decision input for one tick)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub soil_is_dry: bool,
    /// Clock uptime when the tick sampled its sensors.
    pub taken_at: Duration,
}

// ---------------------------------------------------------------------------
// Status snapshot (what the screen shows)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Happy,
    Watering,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Happy => write!(f, "Happy"),
            Self::Watering => write!(f, "Watering..."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub label: StatusLabel,
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl StatusSnapshot {
    pub fn new(label: StatusLabel, state: &LoopState) -> Self {
        Self {
            label,
            temperature_c: state.temperature_c(),
            humidity_pct: state.humidity_pct(),
        }
    }

    /// The three text lines of a full frame, top to bottom.
    ///
    /// Values use the shortest float form (`22.5`, `60`).  A line that does
    /// not fit [`LINE_CAPACITY`] is truncated; the panel is narrower anyway.
    pub fn lines(&self) -> [String<LINE_CAPACITY>; 3] {
        [
            line(format_args!("STATUS: {}", self.label)),
            line(format_args!("Temp: {} C", self.temperature_c)),
            line(format_args!("Hum:  {} %", self.humidity_pct)),
        ]
    }
}

fn line(args: fmt::Arguments<'_>) -> String<LINE_CAPACITY> {
    let mut s = String::new();
    let _ = Truncating(&mut s).write_fmt(args);
    s
}

/// Keeps as many characters as fit and silently drops the rest.
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        for c in text.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}
