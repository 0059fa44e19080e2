//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod bridge_rx;
pub mod bridge_tx;
pub mod buttons;
pub mod display;
pub mod telemetry;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
pub use buttons::buttons_task;
pub use display::display_task;
pub use telemetry::telemetry_task;
