//! Display task
//!
//! Runs the view state machine and keeps the OLED in sync with the current
//! view, the latest metrics and the bridge link status.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Timer;

use spinstat_core::metrics::StatsSnapshot;
use spinstat_core::state::{Button, Event, View};
use spinstat_display::{render_view, GraphicsBackend, Screen};
use spinstat_protocol::{HostMessage, LinkStatus};

use crate::channels::{EVENT_CHANNEL, HOST_CHANNEL, LINK_STATUS, SNAPSHOT};
use crate::config::SPLASH_MS;
use crate::sh1106::Sh1106;

/// Panel type driven by this task
pub type Panel = Sh1106<I2c<'static, I2C1, Async>>;

/// Display task - renders the current view whenever something changes
#[embassy_executor::task]
pub async fn display_task(panel: Panel) {
    info!("Display task started");

    let mut backend = GraphicsBackend::new(panel);
    let mut shown = Screen::new();

    let mut view = View::default();
    let mut link = LinkStatus::Scanning;
    let mut snapshot: Option<StatsSnapshot> = None;

    redraw(&mut backend, &mut shown, view, snapshot.as_ref(), link).await;
    Timer::after_millis(SPLASH_MS).await;
    view = view.transition(Event::BootComplete);

    loop {
        redraw(&mut backend, &mut shown, view, snapshot.as_ref(), link).await;

        match select3(EVENT_CHANNEL.receive(), SNAPSHOT.wait(), LINK_STATUS.wait()).await {
            Either3::First(event) => {
                let not_found = matches!(link, LinkStatus::NotFound { .. });
                if not_found && event == Event::ButtonPressed(Button::Link) {
                    info!("Requesting rescan");
                    if HOST_CHANNEL.try_send(HostMessage::Rescan).is_err() {
                        warn!("Host channel full, dropping RESCAN");
                    }
                }

                let next = view.transition(event);
                if next != view {
                    debug!("View: {:?} -> {:?} on {:?}", view, next, event);
                }
                view = next;
            }
            Either3::Second(latest) => snapshot = Some(latest),
            Either3::Third(status) => link = status,
        }
    }
}

/// Render `view` and push it to the panel if the screen changed
async fn redraw(
    backend: &mut GraphicsBackend<Panel>,
    shown: &mut Screen,
    view: View,
    snapshot: Option<&StatsSnapshot>,
    link: LinkStatus,
) {
    shown.update_from(&render_view(view, snapshot, link));
    if !shown.is_dirty() {
        return;
    }

    if let Err(e) = shown.render_to(backend) {
        warn!("Render failed: {:?}", e);
        return;
    }

    if backend.take_frame() {
        if let Err(e) = backend.target_mut().flush().await {
            warn!("Display flush failed: {:?}", e);
            shown.mark_dirty();
        } else {
            trace!("Display updated");
        }
    }
}
