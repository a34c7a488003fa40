//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to               |
//! |------------|---------------|---------------------------|
//! | `hardware` | SensorPort    | DHT11, soil probe GPIO    |
//! |            | ActuatorPort  | Pump relay GPIO           |
//! | `oled`     | DisplayPort   | SSD1306 over I2C          |
//! | `log_sink` | EventSink     | Serial log output         |
//! | `time`     | Clock         | ESP32 system timer        |
//! | `console`  | (stop flag)   | Serial console input      |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod oled;
pub mod time;
