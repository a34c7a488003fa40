//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one console line per application
//! event through the `log` facade (UART / USB-CDC on the device).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                fallback_temperature_c,
                fallback_humidity_pct,
            } => {
                info!(
                    "START | relay off | fallback {}\u{00b0}C / {}%",
                    fallback_temperature_c, fallback_humidity_pct
                );
            }
            AppEvent::ClimateRefreshed {
                temperature_c,
                humidity_pct,
            } => {
                info!("CLIMA | {}\u{00b0}C / {}%", temperature_c, humidity_pct);
            }
            AppEvent::ClimateReadMissed { consecutive } => {
                debug!("CLIMA | read missed ({} in a row), keeping last values", consecutive);
            }
            AppEvent::ClimateStale { consecutive } => {
                warn!("CLIMA | stale after {} consecutive misses", consecutive);
            }
            AppEvent::SoilWet { temperature_c } => {
                info!("SOIL  | wet, monitoring | T={}\u{00b0}C", temperature_c);
            }
            AppEvent::WateringStarted { duration_ms } => {
                info!("SOIL  | dry, watering for {}ms", duration_ms);
            }
            AppEvent::WateringDone => {
                info!("PUMP  | watering done, relay off");
            }
            AppEvent::DisplaySkipped(e) => {
                warn!("OLED  | frame skipped ({})", e);
            }
            AppEvent::TickFailed { error, backoff_ms } => {
                warn!("TICK  | failed: {} | recovering in {}ms", error, backoff_ms);
            }
            AppEvent::Stopped {
                ticks,
                failed_ticks,
            } => {
                info!("STOP  | {} ticks, {} failed", ticks, failed_ticks);
            }
        }
    }
}
