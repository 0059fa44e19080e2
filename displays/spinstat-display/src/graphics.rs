//! `embedded-graphics` backend
//!
//! Renders the text grid onto any monochrome draw target, typically the
//! in-memory frame buffer of an OLED driver. Pushing the buffer to the panel
//! stays with the driver; `flush` only records that a frame is complete.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{DisplayBackend, DisplayError};

/// Character cell width of normal text
const CELL_WIDTH: u32 = 6;

/// Character cell height of normal text
const CELL_HEIGHT: u32 = 10;

/// Text grid over a monochrome draw target
pub struct GraphicsBackend<D> {
    target: D,
    frame_ready: bool,
}

impl<D> GraphicsBackend<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Wrap a draw target
    pub fn new(target: D) -> Self {
        Self {
            target,
            frame_ready: false,
        }
    }

    /// Access the draw target, e.g. to push its buffer to hardware
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Returns true once per completed frame
    pub fn take_frame(&mut self) -> bool {
        core::mem::take(&mut self.frame_ready)
    }

    /// Release the draw target
    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw(
        &mut self,
        font: &MonoFont<'_>,
        row: u8,
        col: u8,
        text: &str,
    ) -> Result<(), DisplayError> {
        let (_, rows) = self.dimensions();
        if row >= rows {
            return Err(DisplayError::InvalidCoordinates);
        }

        let origin = Point::new(
            (col as u32 * CELL_WIDTH) as i32,
            (row as u32 * CELL_HEIGHT) as i32,
        );
        let style = MonoTextStyle::new(font, BinaryColor::On);

        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }
}

impl<D> DisplayBackend for GraphicsBackend<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.draw(&FONT_6X10, row, col, text)
    }

    fn draw_large_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let (_, rows) = self.dimensions();
        if row as usize + 1 >= rows as usize {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.draw(&FONT_10X20, row, 0, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.frame_ready = true;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        let size = self.target.bounding_box().size;
        (
            (size.width / CELL_WIDTH).min(u8::MAX as u32) as u8,
            (size.height / CELL_HEIGHT).min(u8::MAX as u32) as u8,
        )
    }

    fn is_ready(&self) -> bool {
        true
    }
}
