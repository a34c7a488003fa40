//! PlantCare Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter    OledDisplay   SystemClock   LogEventSink │
//! │  (Sensor+Actuator)  (Display)     (Clock)       (EventSink)  │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │          ControlLoop (pure logic)                  │      │
//! │  │  climate memory · dry/wet decision · pump pulse    │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  Console listener thread ──▶ STOP flag                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use core::sync::atomic::AtomicBool;

use anyhow::Result;
use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use log::{info, warn};

use plantcare::adapters::console;
use plantcare::adapters::hardware::HardwareAdapter;
use plantcare::adapters::log_sink::LogEventSink;
use plantcare::adapters::oled::OledDisplay;
use plantcare::adapters::time::SystemClock;
use plantcare::app::service::ControlLoop;
use plantcare::config::PlantConfig;
use plantcare::drivers::dht11::Dht11;
use plantcare::drivers::hw_init;
use plantcare::drivers::relay::RelayDriver;
use plantcare::drivers::soil::SoilMoistureSensor;
use plantcare::error::Error;
use plantcare::pins;

/// Raised by the console listener; polled once per control cycle.
static STOP: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PlantCare v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("║  Automated watering: press q to stop ║");
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = match PlantConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            PlantConfig::default()
        }
    };

    // ── 3. Raw GPIO (relay latched off first) ─────────────────
    hw_init::init_peripherals(&config).map_err(Error::from)?;
    let relay = RelayDriver::new(config.pump_relay_gpio);
    let soil = SoilMoistureSensor::new(config.soil_sensor_gpio);

    // ── 4. DHT11 + OLED through esp-idf-hal ───────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: the climate and I2C pads are claimed exactly once, here, and
    // are distinct from the raw relay/soil pads (checked by validate()).
    let (dht_pad, sda, scl) = unsafe {
        (
            AnyIOPin::new(config.climate_sensor_gpio),
            AnyIOPin::new(config.i2c_sda_gpio),
            AnyIOPin::new(config.i2c_scl_gpio),
        )
    };
    let dht_pin = PinDriver::input_output_od(dht_pad)?;
    let climate = Dht11::new(dht_pin, Ets);

    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ));
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)?;
    let mut display = OledDisplay::new(i2c, config.display_i2c_address);

    let mut hw = HardwareAdapter::new(climate, soil, relay);
    let mut clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 5. Operator interrupt ─────────────────────────────────
    if let Err(e) = console::spawn_interrupt_listener(&STOP) {
        warn!("Console listener unavailable ({}), running until reset", e);
    }

    // ── 6. Control loop ───────────────────────────────────────
    let mut control = ControlLoop::new(config);
    control.start(&mut hw, &mut sink)?;

    info!("System ready. Entering control loop.");
    control.run(&mut hw, &mut display, &mut clock, &mut sink, &STOP);

    control.shutdown(&mut hw, &mut sink);
    Ok(())
}
