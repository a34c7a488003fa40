//! HardwareAdapter against the simulated GPIO level map.
//!
//! Pads 30..=35 are reserved for this file; unit tests use other pads.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use plantcare::adapters::hardware::HardwareAdapter;
use plantcare::app::ports::{ActuatorPort, SensorPort};
use plantcare::drivers::dht11::Dht11;
use plantcare::drivers::hw_init::{sim_gpio_level, sim_set_gpio_level};
use plantcare::drivers::relay::RelayDriver;
use plantcare::drivers::soil::SoilMoistureSensor;
use plantcare::error::SensorError;

/// A DHT11 line with nothing attached: the pull-up holds it high.
struct FloatingLine;

impl ErrorType for FloatingLine {
    type Error = Infallible;
}

impl InputPin for FloatingLine {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(true)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(false)
    }
}

impl OutputPin for FloatingLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn adapter(soil_pin: i32, relay_pin: i32) -> HardwareAdapter<FloatingLine, NoDelay> {
    HardwareAdapter::new(
        Dht11::new(FloatingLine, NoDelay),
        SoilMoistureSensor::new(soil_pin),
        RelayDriver::new(relay_pin),
    )
}

#[test]
fn missing_climate_sensor_reads_as_transient() {
    let mut hw = adapter(34, 35);
    assert_eq!(hw.read_climate(), Err(SensorError::Transient));
}

#[test]
fn soil_level_maps_to_dry_flag() {
    let mut hw = adapter(32, 33);

    sim_set_gpio_level(32, true);
    assert_eq!(hw.read_moisture(), Ok(true));

    sim_set_gpio_level(32, false);
    assert_eq!(hw.read_moisture(), Ok(false));
}

#[test]
fn pump_commands_drive_relay_pad() {
    let mut hw = adapter(30, 31);
    assert!(!hw.is_pump_on());

    hw.set_pump(true).unwrap();
    assert!(hw.is_pump_on());
    assert!(sim_gpio_level(31));

    hw.set_pump(false).unwrap();
    assert!(!sim_gpio_level(31));

    hw.set_pump(true).unwrap();
    drop(hw);
    assert!(!sim_gpio_level(31), "dropping the adapter opens the relay");
}
