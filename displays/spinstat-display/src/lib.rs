//! Display abstraction and rendering for Spinstat
//!
//! This crate provides:
//! - `DisplayBackend` trait for row/column text displays
//! - `Screen` buffer of normal and large text rows
//! - `GraphicsBackend`, a `DisplayBackend` over any monochrome
//!   `embedded-graphics` draw target
//! - `render_view`, which turns the current view, the latest metrics and
//!   the bridge link status into a screen
//!
//! # Layout
//!
//! The panel is a 128x64 monochrome OLED treated as a grid of 6 rows by
//! 21 columns of 6x10 glyphs. Large text uses a 10x20 font and spans two
//! rows.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod graphics;
pub mod screen;
pub mod views;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use graphics::GraphicsBackend;
pub use screen::{LineSize, Screen, SCREEN_COLS, SCREEN_ROWS};
pub use views::render_view;
