//! SSD1306 OLED adapter (128×64, I2C).
//!
//! SSD1306 only: buffered mode flushes with horizontal addressing, which
//! SH1106 controllers lack.
//!
//! Implements [`DisplayPort`].  The panel is initialised lazily on the first
//! render and again after any bus failure, so a display that was unplugged
//! or browned out comes back without a reboot.  Rendering never touches the
//! control loop's state; a failed frame is just reported.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use log::{info, warn};
use ssd1306::mode::{BufferedGraphicsMode, DisplayConfig};
use ssd1306::prelude::{DisplayRotation, DisplaySize128x64, I2CInterface};
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::app::ports::DisplayPort;
use crate::app::state::StatusSnapshot;
use crate::error::DisplayError;

/// Vertical distance between status lines, in pixels.
pub const LINE_PITCH_PX: i32 = 15;

type Panel<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledDisplay<I2C> {
    panel: Panel<I2C>,
    ready: bool,
}

impl<I2C: I2c> OledDisplay<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            panel,
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn ensure_init(&mut self) -> Result<(), DisplayError> {
        if self.ready {
            return Ok(());
        }
        self.panel.init().map_err(|_| DisplayError::InitFailed)?;
        self.ready = true;
        info!("OLED initialised");
        Ok(())
    }
}

impl<I2C: I2c> DisplayPort for OledDisplay<I2C> {
    fn render(&mut self, snapshot: &StatusSnapshot) -> Result<(), DisplayError> {
        self.ensure_init()?;

        self.panel.clear_buffer();
        draw_status(&mut self.panel, snapshot).map_err(|_| DisplayError::Bus)?;

        if self.panel.flush().is_err() {
            warn!("OLED flush failed, re-initialising on next frame");
            self.ready = false;
            return Err(DisplayError::Bus);
        }
        Ok(())
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Draw the three status lines onto any monochrome target.
pub fn draw_status<D>(target: &mut D, snapshot: &StatusSnapshot) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = text_style();
    for (row, line) in (0i32..).zip(snapshot.lines().iter()) {
        Text::with_baseline(line, Point::new(0, row * LINE_PITCH_PX), style, Baseline::Top)
            .draw(target)?;
    }
    Ok(())
}
