//! Button task
//!
//! Polls the four front-panel keys and turns debounced presses into view
//! events. Keys are active-low with internal pull-ups.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use spinstat_core::state::{Button, Event};

use crate::channels::EVENT_CHANNEL;
use crate::config::DEBOUNCE_MS;

/// Key sampling period
const POLL_INTERVAL_MS: u64 = 5;

/// Consecutive identical samples needed to accept a level change
const STABLE_SAMPLES: u8 = {
    let samples = DEBOUNCE_MS / POLL_INTERVAL_MS;
    if samples == 0 {
        1
    } else if samples > u8::MAX as u64 {
        u8::MAX
    } else {
        samples as u8
    }
};

/// One key with its debounce state
struct Key {
    input: Input<'static>,
    button: Button,
    pressed: bool,
    count: u8,
}

impl Key {
    fn new(input: Input<'static>, button: Button) -> Self {
        Self {
            input,
            button,
            pressed: false,
            count: 0,
        }
    }

    /// Sample the pin; returns true on a debounced press edge
    fn poll(&mut self) -> bool {
        let raw = self.input.is_low();

        if raw == self.pressed {
            self.count = 0;
            return false;
        }

        self.count += 1;
        if self.count < STABLE_SAMPLES {
            return false;
        }

        self.count = 0;
        self.pressed = raw;
        raw
    }
}

/// Button task - emits `Event::ButtonPressed` on each debounced press
#[embassy_executor::task]
pub async fn buttons_task(
    cadence: Input<'static>,
    speed: Input<'static>,
    distance: Input<'static>,
    link: Input<'static>,
) {
    info!("Button task started");

    let mut keys = [
        Key::new(cadence, Button::Cadence),
        Key::new(speed, Button::Speed),
        Key::new(distance, Button::Distance),
        Key::new(link, Button::Link),
    ];
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        for key in keys.iter_mut() {
            if key.poll() {
                debug!("Button: {:?}", key.button);
                if EVENT_CHANNEL
                    .try_send(Event::ButtonPressed(key.button))
                    .is_err()
                {
                    warn!("Event channel full, dropping key press");
                }
            }
        }
    }
}
