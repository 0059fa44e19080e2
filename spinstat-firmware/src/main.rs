//! Spinstat - Spin Bike Cadence & Speed Display
//!
//! Main firmware binary for the RP2040 head unit. A BLE bridge forwards
//! Cycling Speed & Cadence measurements over UART; this firmware turns them
//! into cadence, speed and distance and shows the selected metric on an
//! SH1106 OLED.
//!
//! # Pins
//!
//! - UART0 (GPIO0 TX, GPIO1 RX): BLE bridge, 115200 baud
//! - I2C1 (GPIO6 SDA, GPIO7 SCL): SH1106 panel
//! - GPIO15/17/2/3: cadence, speed, distance and link keys (active-low)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::sh1106::Sh1106;

mod channels;
mod config;
mod sh1106;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Spinstat firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!(
        "Bike config: wheel={} m, smoothing={}",
        config::WHEEL_SIZE_M,
        config::SMOOTHING_FACTOR
    );

    // Setup UART for the BLE bridge
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for bridge communication");

    // Setup I2C for the OLED
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, i2c_config);

    let mut panel = Sh1106::new(i2c);
    if let Err(e) = panel.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
    }

    // Front-panel keys
    let key_cadence = Input::new(p.PIN_15, Pull::Up);
    let key_speed = Input::new(p.PIN_17, Pull::Up);
    let key_distance = Input::new(p.PIN_2, Pull::Up);
    let key_link = Input::new(p.PIN_3, Pull::Up);

    // Spawn tasks
    unwrap!(spawner.spawn(tasks::bridge_rx_task(rx)));
    unwrap!(spawner.spawn(tasks::bridge_tx_task(tx)));
    unwrap!(spawner.spawn(tasks::telemetry_task()));
    unwrap!(spawner.spawn(tasks::buttons_task(
        key_cadence,
        key_speed,
        key_distance,
        key_link
    )));
    unwrap!(spawner.spawn(tasks::display_task(panel)));

    info!("All tasks spawned, firmware running");
}
