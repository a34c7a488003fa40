//! Mock adapters for integration tests.
//!
//! Scripted sensors, a recording relay, a recording screen and a simulated
//! clock.  The clock can raise the stop flag after a number of cycles and
//! can panic mid-sleep to simulate a fault inside a pump pulse.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use plantcare::app::events::AppEvent;
use plantcare::app::ports::{ActuatorPort, Clock, DisplayPort, EventSink, SensorPort};
use plantcare::app::state::{ClimateSample, StatusSnapshot};
use plantcare::config::PlantConfig;
use plantcare::error::{ActuatorError, DisplayError, SensorError};

/// Config with a tick cadence distinct from the pump pulse, so sleeps can
/// be told apart in assertions.
pub fn test_config() -> PlantConfig {
    PlantConfig {
        pump_duration_ms: 2_000,
        tick_interval_ms: 5_000,
        recovery_delay_ms: 1_000,
        stale_warning_after: 3,
        ..PlantConfig::default()
    }
}

pub fn climate(temperature_c: f32, humidity_pct: f32) -> ClimateSample {
    ClimateSample {
        temperature_c,
        humidity_pct,
    }
}

// ── MockHardware ──────────────────────────────────────────────

/// Scripted sensors plus a recording relay.  An exhausted climate script
/// reads as a transient miss; an exhausted moisture script repeats
/// `default_dry`.
pub struct MockHardware {
    pub climate: VecDeque<Result<ClimateSample, SensorError>>,
    pub moisture: VecDeque<Result<bool, SensorError>>,
    pub default_dry: bool,
    pub pump_on: bool,
    pub pump_calls: Vec<bool>,
    pub fail_pump_on: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            climate: VecDeque::new(),
            moisture: VecDeque::new(),
            default_dry: false,
            // Unknown at power-up; the loop must force it off.
            pump_on: true,
            pump_calls: Vec::new(),
            fail_pump_on: false,
        }
    }

    pub fn wet() -> Self {
        Self::new()
    }

    pub fn dry() -> Self {
        Self {
            default_dry: true,
            ..Self::new()
        }
    }

    pub fn with_climate(mut self, reads: impl IntoIterator<Item = Result<ClimateSample, SensorError>>) -> Self {
        self.climate.extend(reads);
        self
    }

    pub fn with_moisture(mut self, reads: impl IntoIterator<Item = Result<bool, SensorError>>) -> Self {
        self.moisture.extend(reads);
        self
    }

    pub fn off_commands(&self) -> usize {
        self.pump_calls.iter().filter(|on| !**on).count()
    }

    pub fn on_commands(&self) -> usize {
        self.pump_calls.iter().filter(|on| **on).count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> Result<ClimateSample, SensorError> {
        self.climate.pop_front().unwrap_or(Err(SensorError::Transient))
    }

    fn read_moisture(&mut self) -> Result<bool, SensorError> {
        self.moisture.pop_front().unwrap_or(Ok(self.default_dry))
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pump_calls.push(on);
        if on && self.fail_pump_on {
            return Err(ActuatorError::GpioWriteFailed(-1));
        }
        self.pump_on = on;
        Ok(())
    }

    fn is_pump_on(&self) -> bool {
        self.pump_on
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<StatusSnapshot>,
    pub broken: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> &StatusSnapshot {
        self.frames.last().expect("no frame rendered")
    }

    /// The three text lines of the last frame.
    pub fn last_lines(&self) -> [String; 3] {
        self.last().lines().map(|l| l.as_str().to_owned())
    }
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, snapshot: &StatusSnapshot) -> Result<(), DisplayError> {
        if self.broken {
            return Err(DisplayError::Bus);
        }
        self.frames.push(*snapshot);
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Simulated time.  Sleeps advance `now` instantly.
#[derive(Default)]
pub struct MockClock {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
    /// Raise `stop` after this many sleeps equal to `cadence`.
    stop_after: Option<(usize, Duration, Arc<AtomicBool>)>,
    panic_on: Option<Duration>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop after `cycles` full tick intervals.
    pub fn stopping_after(cycles: usize, cadence: Duration) -> (Self, Arc<AtomicBool>) {
        let stop = Arc::new(AtomicBool::new(false));
        let clock = Self {
            stop_after: Some((cycles, cadence, stop.clone())),
            ..Self::default()
        };
        (clock, stop)
    }

    /// Panic when asked to sleep exactly `duration`.
    pub fn panicking_on(duration: Duration) -> Self {
        Self {
            panic_on: Some(duration),
            ..Self::default()
        }
    }

    /// Same as [`panicking_on`](Self::panicking_on), for a clock that
    /// already has a stop condition.
    pub fn and_panicking_on(mut self, duration: Duration) -> Self {
        self.panic_on = Some(duration);
        self
    }

    pub fn count(&self, duration: Duration) -> usize {
        self.sleeps.iter().filter(|d| **d == duration).count()
    }
}

impl Clock for MockClock {
    fn sleep(&mut self, duration: Duration) {
        if self.panic_on == Some(duration) {
            panic!("simulated fault while sleeping {duration:?}");
        }
        self.now += duration;
        self.sleeps.push(duration);
        if let Some((cycles, cadence, stop)) = &self.stop_after {
            if self.sleeps.iter().filter(|d| *d == cadence).count() >= *cycles {
                stop.store(true, Ordering::Release);
            }
        }
    }

    fn uptime(&self) -> Duration {
        self.now
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
