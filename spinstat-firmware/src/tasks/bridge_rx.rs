//! Bridge UART receive task
//!
//! Receives frames from the BLE bridge and dispatches measurements, link
//! status changes and heartbeats.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use spinstat_core::state::Event;
use spinstat_protocol::{BridgeMessage, FrameParser, HostMessage, LinkStatus};

use crate::channels::{EVENT_CHANNEL, HOST_CHANNEL, LINK_STATUS, MEASUREMENT_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bridge RX task - receives and parses frames from the BLE bridge
#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx) {
    info!("Bridge RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeMessage::from_frame(&frame) {
                            Ok(msg) => handle_bridge_message(msg),
                            Err(e) => warn!("Failed to parse bridge message: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Handle a parsed bridge message
fn handle_bridge_message(msg: BridgeMessage) {
    match msg {
        BridgeMessage::Measurement(raw) => {
            trace!("Measurement: {} bytes", raw.len());
            if MEASUREMENT_CHANNEL.try_send(raw).is_err() {
                warn!("Measurement channel full, dropping frame");
            }
        }
        BridgeMessage::Status(status) => {
            info!("Link status: {:?}", status);
            LINK_STATUS.signal(status);

            let event = match status {
                LinkStatus::Connected => Event::LinkUp,
                LinkStatus::Scanning => return,
                LinkStatus::Disconnected | LinkStatus::NotFound { .. } => Event::LinkDown,
            };
            if EVENT_CHANNEL.try_send(event).is_err() {
                warn!("Event channel full, dropping {:?}", event);
            }
        }
        BridgeMessage::Ping => {
            trace!("PING received");
            if HOST_CHANNEL.try_send(HostMessage::Pong).is_err() {
                warn!("Host channel full, dropping PONG");
            }
        }
    }
}
