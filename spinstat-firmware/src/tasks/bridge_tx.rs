//! Bridge UART transmit task
//!
//! Sends heartbeat responses and rescan requests to the BLE bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use spinstat_protocol::frame::MAX_FRAME_SIZE;
use spinstat_protocol::HostMessage;

use crate::channels::HOST_CHANNEL;

/// Bridge TX task - drains the host channel onto the UART
#[embassy_executor::task]
pub async fn bridge_tx_task(mut tx: BufferedUartTx) {
    info!("Bridge TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let msg = HOST_CHANNEL.receive().await;

        match msg.to_frame().encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send {:?}: {:?}", msg, e);
                } else {
                    trace!("Sent {:?}", msg);
                }
            }
            Err(e) => warn!("Failed to encode {:?}: {:?}", msg, e),
        }
    }
}
