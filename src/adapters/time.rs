//! System clock adapter.
//!
//! Implements [`Clock`] for the real device and host simulation.
//!
//! - **`target_os = "espidf"`** — uptime from `esp_timer_get_time()`
//!   (microsecond precision, monotonic); sleeps yield to FreeRTOS through
//!   `std::thread::sleep`.
//! - **`not(target_os = "espidf")`** — `std::time::Instant` and
//!   `std::thread::sleep`.

use core::time::Duration;

use crate::app::ports::Clock;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    /// Time since boot (monotonic).
    #[cfg(target_os = "espidf")]
    fn uptime(&self) -> Duration {
        // SAFETY: esp_timer_get_time reads a free-running hardware counter.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        Duration::from_micros(us.max(0) as u64)
    }

    /// Time since the clock was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    fn uptime(&self) -> Duration {
        self.start.elapsed()
    }
}
