//! DHT11 temperature/humidity sensor (single-wire, bit-banged).
//!
//! Protocol, all timings nominal:
//!
//! ```text
//!  host: ──┐ ≥18 ms ┌── release
//!          └────────┘
//!  sensor:            └─80µs─┘‾‾80µs‾‾└50µs┘‾26µs‾ (0)  └50µs┘‾‾70µs‾‾ (1) ... ×40
//! ```
//!
//! 40 bits arrive MSB first: humidity integer, humidity decimal,
//! temperature integer, temperature decimal (bit 7 = sign), checksum.
//!
//! The driver is generic over `embedded-hal` 1.0 pins and delays so it
//! runs against a simulated line in host tests.  Reads fail often on real
//! parts (interrupt jitter, long cables); every failure maps to
//! [`SensorError::Transient`].

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::state::ClimateSample;
use crate::error::SensorError;

/// Host start pulse; the datasheet minimum is 18 ms.
const START_LOW_MS: u32 = 20;
/// Longest any single line phase may last before the read is abandoned.
const PHASE_TIMEOUT_US: u32 = 100;
/// A data bit's high phase longer than this is a `1`.
const ONE_THRESHOLD_US: u32 = 40;

const HUMIDITY_RANGE: core::ops::RangeInclusive<f32> = 0.0..=100.0;
const TEMPERATURE_RANGE: core::ops::RangeInclusive<f32> = -20.0..=60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dht11Error {
    /// The line did not change level within the expected window.
    Timeout,
    /// Frame checksum did not match the payload.
    Checksum { expected: u8, actual: u8 },
    /// Decoded values outside what the part can measure.
    OutOfRange,
    /// The GPIO itself reported an error.
    Pin,
}

impl fmt::Display for Dht11Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Checksum { expected, actual } => {
                write!(f, "checksum mismatch (expected {expected:#04x}, got {actual:#04x})")
            }
            Self::OutOfRange => write!(f, "value out of range"),
            Self::Pin => write!(f, "pin error"),
        }
    }
}

impl From<Dht11Error> for SensorError {
    fn from(_: Dht11Error) -> Self {
        Self::Transient
    }
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be open-drain with a pull-up; it is released (high) here.
    pub fn new(mut pin: P, delay: D) -> Self {
        let _ = pin.set_high();
        Self { pin, delay }
    }

    /// Run one full transaction and decode it.
    pub fn read(&mut self) -> Result<ClimateSample, Dht11Error> {
        let frame = self.read_frame();
        // Leave the line released whatever happened.
        let _ = self.pin.set_high();
        decode_frame(frame?)
    }

    /// Give the pin and delay back.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], Dht11Error> {
        self.pin.set_low().map_err(|_| Dht11Error::Pin)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| Dht11Error::Pin)?;

        // Response: pull-up until the sensor answers, then 80 µs low, 80 µs high.
        self.wait_while(true)?;
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_while(false)?;
            let high_us = self.wait_while(true)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(frame)
    }

    /// Spin while the line is at `level`; returns the elapsed microseconds.
    fn wait_while(&mut self, level: bool) -> Result<u32, Dht11Error> {
        let mut elapsed = 0;
        while self.pin.is_high().map_err(|_| Dht11Error::Pin)? == level {
            if elapsed >= PHASE_TIMEOUT_US {
                return Err(Dht11Error::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(elapsed)
    }
}

/// Validate and convert a raw 5-byte frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateSample, Dht11Error> {
    let expected = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if expected != frame[4] {
        return Err(Dht11Error::Checksum {
            expected,
            actual: frame[4],
        });
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) / 10.0;
    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) / 10.0;
    let temperature_c = if frame[3] & 0x80 != 0 { -magnitude } else { magnitude };

    if !HUMIDITY_RANGE.contains(&humidity_pct) || !TEMPERATURE_RANGE.contains(&temperature_c) {
        return Err(Dht11Error::OutOfRange);
    }
    Ok(ClimateSample {
        temperature_c,
        humidity_pct,
    })
}
