//! Control loop — the hexagonal core.
//!
//! [`ControlLoop`] owns the configuration and the [`LoopState`] memory.  All
//! I/O flows through port traits injected at call sites, so the whole loop
//! runs against mock adapters on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ DisplayPort
//!                 │      ControlLoop       │ ──▶ EventSink
//! ActuatorPort ◀──│  LoopState · decision  │ ◀── Clock
//!                 └────────────────────────┘
//! ```
//!
//! One tick: refresh climate (misses keep the last good values) → sample
//! soil → water (pulse) or monitor (relay off) → render.  [`ControlLoop::run`]
//! wraps ticks in the error boundary and the fixed cadence.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info, warn};

use crate::config::PlantConfig;
use crate::error::{Error, Result, SensorError};

use super::actuation;
use super::events::AppEvent;
use super::ports::{ActuatorPort, Clock, DisplayPort, EventSink, SensorPort};
use super::state::{LoopState, Reading, StatusLabel, StatusSnapshot};

// ───────────────────────────────────────────────────────────────
// Tick report
// ───────────────────────────────────────────────────────────────

/// What a single tick observed and did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    pub reading: Reading,
    pub label: StatusLabel,
    /// `true` if this tick's climate read succeeded.
    pub climate_fresh: bool,
    /// `true` if a pump pulse ran to completion.
    pub watered: bool,
    /// Frames that failed to render this tick.
    pub display_failures: u8,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    config: PlantConfig,
    state: LoopState,
    tick_count: u64,
    failed_ticks: u64,
}

impl ControlLoop {
    /// Construct the loop from configuration.  `LoopState` starts on the
    /// configured fallback values.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: PlantConfig) -> Self {
        let state = LoopState::new(&config);
        Self {
            config,
            state,
            tick_count: 0,
            failed_ticks: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force the relay off before the first tick so a restart mid-pulse
    /// cannot leave the pump running.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) -> Result<()> {
        hw.set_pump(false)?;
        sink.emit(&AppEvent::Started {
            fallback_temperature_c: self.config.fallback_temperature_c,
            fallback_humidity_pct: self.config.fallback_humidity_pct,
        });
        info!(
            "ControlLoop started (pump {} ms, tick {} ms)",
            self.config.pump_duration_ms, self.config.tick_interval_ms
        );
        Ok(())
    }

    /// Run ticks until `stop` is set.  No single tick can end the loop:
    /// a failed or panicking tick is reported, followed by the recovery
    /// delay, and the cadence continues.  Returns the number of ticks
    /// attempted.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
        stop: &AtomicBool,
    ) -> u64 {
        while !stop.load(Ordering::Acquire) {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                self.tick(&mut *hw, &mut *display, &mut *clock, &mut *sink)
            }))
            .unwrap_or_else(|payload| {
                error!("Tick {} panicked: {}", self.tick_count, panic_message(&*payload));
                Err(Error::Unexpected)
            });
            if let Err(e) = outcome {
                self.failed_ticks += 1;
                error!("Tick {} failed: {} (recovering...)", self.tick_count, e);
                sink.emit(&AppEvent::TickFailed {
                    error: e,
                    backoff_ms: self.config.recovery_delay_ms,
                });
                clock.sleep(self.config.recovery_delay());
            }
            clock.sleep(self.config.tick_interval());
        }
        self.tick_count
    }

    /// Switch the pump off after the loop has stopped.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        if let Err(e) = hw.set_pump(false) {
            error!("Shutdown: relay off failed ({})", e);
        }
        sink.emit(&AppEvent::Stopped {
            ticks: self.tick_count,
            failed_ticks: self.failed_ticks,
        });
        info!("ControlLoop stopped after {} ticks", self.tick_count);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: climate → soil → water or monitor → render.
    ///
    /// Transient climate misses and display failures are absorbed here.
    /// Anything else aborts the tick with `Err`; the relay is still off
    /// when that happens.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        clock: &mut impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<TickReport> {
        self.tick_count += 1;

        // 1. Climate, with last-good memory
        let climate_fresh = self.refresh_climate(hw, &*clock, sink)?;

        // 2. Soil
        let soil_is_dry = hw.read_moisture()?;
        let reading = Reading {
            temperature_c: self.state.temperature_c(),
            humidity_pct: self.state.humidity_pct(),
            soil_is_dry,
            taken_at: clock.uptime(),
        };

        // 3. Decide and actuate
        let mut display_failures = 0;
        let (label, watered) = if soil_is_dry {
            info!("Soil is DRY - watering...");
            sink.emit(&AppEvent::WateringStarted {
                duration_ms: self.config.pump_duration_ms,
            });
            let snapshot = StatusSnapshot::new(StatusLabel::Watering, &self.state);
            display_failures += self.render(display, &snapshot, sink);

            actuation::pulse(hw, self.config.pump_duration(), clock)?;
            info!("Watering done.");
            sink.emit(&AppEvent::WateringDone);

            // Relay switching often glitches the panel; redraw once the
            // pump is quiet.
            display_failures += self.render(display, &snapshot, sink);
            (StatusLabel::Watering, true)
        } else {
            info!("Soil is WET - Temp: {} C", self.state.temperature_c());
            sink.emit(&AppEvent::SoilWet {
                temperature_c: self.state.temperature_c(),
            });
            // Every tick, not only on the dry→wet edge: a lost off-command
            // must not leave the pump running.
            hw.set_pump(false)?;
            let snapshot = StatusSnapshot::new(StatusLabel::Happy, &self.state);
            display_failures += self.render(display, &snapshot, sink);
            (StatusLabel::Happy, false)
        };

        Ok(TickReport {
            tick: self.tick_count,
            reading,
            label,
            climate_fresh,
            watered,
            display_failures,
        })
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last known good climate memory.
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn config(&self) -> &PlantConfig {
        &self.config
    }

    /// Total ticks attempted since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Ticks that ended in the error boundary.
    pub fn failed_ticks(&self) -> u64 {
        self.failed_ticks
    }

    /// Interval between ticks, excluding pulse time and recovery backoff.
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Returns `Ok(true)` on a fresh read, `Ok(false)` on an absorbed miss.
    fn refresh_climate(
        &mut self,
        hw: &mut impl SensorPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<bool> {
        match hw.read_climate() {
            Ok(sample) => {
                self.state.record_success(sample, clock.uptime());
                debug!(
                    "Climate: {} C / {} %",
                    sample.temperature_c, sample.humidity_pct
                );
                sink.emit(&AppEvent::ClimateRefreshed {
                    temperature_c: sample.temperature_c,
                    humidity_pct: sample.humidity_pct,
                });
                Ok(true)
            }
            Err(SensorError::Transient) => {
                let consecutive = self.state.record_failure();
                debug!("Climate read missed ({} in a row), keeping last values", consecutive);
                sink.emit(&AppEvent::ClimateReadMissed { consecutive });
                if consecutive == self.config.stale_warning_after {
                    warn!(
                        "Climate data stale: {} consecutive misses, showing {} C / {} %",
                        consecutive,
                        self.state.temperature_c(),
                        self.state.humidity_pct()
                    );
                    sink.emit(&AppEvent::ClimateStale { consecutive });
                }
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort render.  Returns the number of failed frames (0 or 1).
    fn render(
        &self,
        display: &mut impl DisplayPort,
        snapshot: &StatusSnapshot,
        sink: &mut impl EventSink,
    ) -> u8 {
        match display.render(snapshot) {
            Ok(()) => 0,
            Err(e) => {
                debug!("Display skipped: {}", e);
                sink.emit(&AppEvent::DisplaySkipped(e));
                1
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}
