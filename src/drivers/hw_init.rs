//! One-shot GPIO initialization and raw level helpers.
//!
//! Configures the relay output and the soil probe input using raw ESP-IDF
//! sys calls.  Called once from `main()` before the control loop starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real `gpio_config` / `gpio_set_level` / `gpio_get_level`.
//! On host/test: a 64-bit atomic level map stands in for the pads, so
//! drivers and tests observe the same simulated wiring.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

use crate::config::PlantConfig;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    InvalidPin(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::InvalidPin(pin) => write!(f, "GPIO {} does not exist", pin),
        }
    }
}

impl From<HwInitError> for crate::error::Error {
    fn from(_: HwInitError) -> Self {
        Self::Init("GPIO configuration failed")
    }
}

/// Highest pad number on the ESP32-S3.
const MAX_GPIO: i32 = 48;

fn check_pin(pin: i32) -> Result<(), HwInitError> {
    if (0..=MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(HwInitError::InvalidPin(pin))
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals(config: &PlantConfig) -> Result<(), HwInitError> {
    check_pin(config.pump_relay_gpio)?;
    check_pin(config.soil_sensor_gpio)?;
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_relay_output(config.pump_relay_gpio)?;
        init_soil_input(config.soil_sensor_gpio)?;
    }
    log::info!("hw_init: relay GPIO{} out, soil GPIO{} in", config.pump_relay_gpio, config.soil_sensor_gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals(config: &PlantConfig) -> Result<(), HwInitError> {
    check_pin(config.pump_relay_gpio)?;
    check_pin(config.soil_sensor_gpio)?;
    sim_set_gpio_level(config.pump_relay_gpio, false);
    log::info!("hw_init(sim): relay GPIO{} forced low", config.pump_relay_gpio);
    Ok(())
}

// ── GPIO Output (relay) ───────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_relay_output(pin: i32) -> Result<(), HwInitError> {
    // Latch LOW before the pad becomes an output so the relay never
    // glitches closed during boot.
    let ret = unsafe { gpio_set_level(pin, 0) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

// ── GPIO Input (soil probe) ───────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_soil_input(pin: i32) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

// ── Level access ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Write a level.  `Err` carries the ESP-IDF return code.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_peripherals(). Main-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: AtomicU64 = AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim_gpio_level(pin)
}

/// Write a level.  Out-of-range pins fail like `ESP_ERR_INVALID_ARG`.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    const ESP_ERR_INVALID_ARG: i32 = 0x102;
    if check_pin(pin).is_err() {
        return Err(ESP_ERR_INVALID_ARG);
    }
    sim_set_gpio_level(pin, high);
    Ok(())
}

/// Drive a simulated pad (test/simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gpio_level(pin: i32, high: bool) {
    if check_pin(pin).is_err() {
        return;
    }
    let mask = 1u64 << pin;
    if high {
        SIM_GPIO_LEVELS.fetch_or(mask, Ordering::AcqRel);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!mask, Ordering::AcqRel);
    }
}

/// Current simulated pad level (test/simulation only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    check_pin(pin).is_ok() && SIM_GPIO_LEVELS.load(Ordering::Acquire) & (1u64 << pin) != 0
}
