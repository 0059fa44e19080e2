//! Display backend trait
//!
//! Anything that can show a grid of text rows implements [`DisplayBackend`].

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The underlying target rejected a draw
    Communication,
    /// Row or column outside the grid
    InvalidCoordinates,
    /// Panel not ready to draw
    NotInitialized,
}

/// Row/column text display
///
/// Coordinates are in character cells of the normal font. Drawing may be
/// buffered until [`DisplayBackend::flush`].
pub trait DisplayBackend {
    /// Blank the whole display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw `text` in the normal font starting at (`row`, `col`)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Draw `text` in the large font, covering `row` and `row + 1`
    fn draw_large_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Complete the current frame
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Grid size as (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// Whether the display can accept drawing
    fn is_ready(&self) -> bool;
}
