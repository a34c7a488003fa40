//! GPIO / peripheral pin assignments for the PlantCare controller board.
//!
//! These are the board defaults; [`PlantConfig`](crate::config::PlantConfig)
//! copies them into named fields so a different wiring only needs a config
//! override, not a code change.

// ---------------------------------------------------------------------------
// Pump relay (SRD-05VDC module, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay closed = pump running.
pub const PUMP_RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// Digital input from the soil probe comparator (FC-28 DO pin).
/// HIGH = soil dry, LOW = soil wet.
pub const SOIL_SENSOR_GPIO: i32 = 6;

/// DHT11 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const CLIMATE_SENSOR_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Status display (128x64 OLED, I2C0)
//
// The board is fitted with an SSD1306 controller.  SH1106 modules look the
// same but use a 132-column RAM with page addressing only; they are not
// supported and show a garbled frame.
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
/// 7-bit I2C address of the OLED controller.
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;
pub const I2C_BAUDRATE_HZ: u32 = 400_000;
