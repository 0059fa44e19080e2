//! Screen buffer types
//!
//! A character-based screen buffer where each row holds either normal text
//! or the top half of a double-height line.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the panel
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns on the panel
pub const SCREEN_COLS: usize = 21;

/// Characters that fit on one double-height line
pub const LARGE_COLS: usize = 12;

/// Text size of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineSize {
    #[default]
    Normal,
    /// Double height, also covers the next row
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Line {
    text: String<SCREEN_COLS>,
    size: LineSize,
}

/// Screen buffer
///
/// Rows are rendered top to bottom by [`Screen::render_to`]. The dirty flag
/// is raised only when content actually changes, so redrawing an unchanged
/// view costs nothing.
#[derive(Debug, Clone)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| Line::default()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for row in 0..SCREEN_ROWS {
            self.store(row, "", LineSize::Normal, 0);
        }
    }

    /// Set a row of normal text, truncated to the panel width
    pub fn set_line(&mut self, row: usize, text: &str) {
        self.store(row, text, LineSize::Normal, SCREEN_COLS);
    }

    /// Set a double-height row
    ///
    /// The row below is blanked since the large glyphs cover it. Ignored on
    /// the last row.
    pub fn set_large(&mut self, row: usize, text: &str) {
        if row + 1 < SCREEN_ROWS {
            self.store(row, text, LineSize::Large, LARGE_COLS);
            self.store(row + 1, "", LineSize::Normal, 0);
        }
    }

    fn store(&mut self, row: usize, text: &str, size: LineSize, max_chars: usize) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let mut next = Line {
            text: String::new(),
            size,
        };
        for ch in text.chars().take(max_chars) {
            if next.text.push(ch).is_err() {
                break;
            }
        }

        if *line != next {
            *line = next;
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|l| l.text.as_str())
    }

    /// Get the text size of a specific row
    pub fn line_size(&self, row: usize) -> Option<LineSize> {
        self.lines.get(row).map(|l| l.size)
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Copy another screen's content, raising the dirty flag only on change
    pub fn update_from(&mut self, other: &Screen) {
        if self.lines != other.lines {
            self.lines.clone_from(&other.lines);
            self.dirty = true;
        }
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Draw every row to `backend`, flush, and mark the screen clean
    pub fn render_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        if !backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if line.text.is_empty() {
                continue;
            }
            match line.size {
                LineSize::Normal => backend.draw_text(row as u8, 0, &line.text)?,
                LineSize::Large => backend.draw_large_text(row as u8, &line.text)?,
            }
        }
        backend.flush()?;

        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.text.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::{String as StdString, ToString};
    use std::vec::Vec;

    /// Records every backend call
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<StdString>,
        offline: bool,
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.calls.push("clear".to_string());
            Ok(())
        }

        fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
            self.calls.push(std::format!("text {row},{col} {text}"));
            Ok(())
        }

        fn draw_large_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
            self.calls.push(std::format!("large {row} {text}"));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.calls.push("flush".to_string());
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }

        fn is_ready(&self) -> bool {
            !self.offline
        }
    }

    #[test]
    fn test_screen_basic() {
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        assert_eq!(screen.get_line(0), Some("Hello"));
        assert_eq!(screen.line_size(0), Some(LineSize::Normal));
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_line_truncated() {
        let mut screen = Screen::new();
        screen.set_line(1, "a line that is far too long for the panel");
        assert_eq!(screen.get_line(1).map(str::len), Some(SCREEN_COLS));

        screen.set_large(2, "0123456789abcdef");
        assert_eq!(screen.get_line(2), Some("0123456789ab"));
    }

    #[test]
    fn test_large_blanks_next_row() {
        let mut screen = Screen::new();
        screen.set_line(3, "under");
        screen.set_large(2, "85.0");
        assert_eq!(screen.line_size(2), Some(LineSize::Large));
        assert_eq!(screen.get_line(3), Some(""));
    }

    #[test]
    fn test_large_ignored_on_last_row() {
        let mut screen = Screen::new();
        screen.set_large(SCREEN_ROWS - 1, "85.0");
        assert_eq!(screen.get_line(SCREEN_ROWS - 1), Some(""));
    }

    #[test]
    fn test_dirty_only_on_change() {
        let mut screen = Screen::new();
        screen.set_line(0, "Speed");
        screen.render_to(&mut RecordingBackend::default()).unwrap();
        assert!(!screen.is_dirty());

        screen.set_line(0, "Speed");
        assert!(!screen.is_dirty());

        screen.set_line(0, "Cadence");
        assert!(screen.is_dirty());
    }

    #[test]
    fn test_update_from() {
        let mut shown = Screen::new();
        shown.render_to(&mut RecordingBackend::default()).unwrap();

        let same = Screen::new();
        shown.update_from(&same);
        assert!(!shown.is_dirty());

        let mut next = Screen::new();
        next.set_line(0, "Searching...");
        shown.update_from(&next);
        assert!(shown.is_dirty());
        assert_eq!(shown.get_line(0), Some("Searching..."));
    }

    #[test]
    fn test_render_to_backend() {
        let mut screen = Screen::new();
        screen.set_line(0, "Speed");
        screen.set_large(2, "31.5");
        screen.set_line(5, "km/h");

        let mut backend = RecordingBackend::default();
        screen.render_to(&mut backend).unwrap();

        assert_eq!(
            backend.calls,
            ["clear", "text 0,0 Speed", "large 2 31.5", "text 5,0 km/h", "flush"]
        );
    }

    #[test]
    fn test_render_to_offline_backend() {
        let mut screen = Screen::new();
        let mut backend = RecordingBackend {
            offline: true,
            ..Default::default()
        };
        assert_eq!(
            screen.render_to(&mut backend),
            Err(DisplayError::NotInitialized)
        );
        assert!(screen.is_dirty());
        assert!(backend.calls.is_empty());
    }
}
