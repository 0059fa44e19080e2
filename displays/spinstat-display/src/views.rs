//! Screen rendering
//!
//! Builds a screen for each view from the latest metrics and link status.

use core::fmt::Write;

use heapless::String;
use spinstat_core::metrics::StatsSnapshot;
use spinstat_core::state::{Metric, View};
use spinstat_protocol::LinkStatus;

use crate::screen::{Screen, LARGE_COLS, SCREEN_COLS};

/// Advertised name of the bike the bridge looks for
pub const BIKE_NAME: &str = "IC Bike";

/// Banner shown at power-on
pub const SPLASH_TEXT: &str = "IC4-RPM";

/// Shown in place of a value until two samples have arrived
const NO_VALUE: &str = "--";

/// Build the screen for `view`
///
/// `snapshot` is the last good metrics reading, if any. `link` is the last
/// status reported by the bridge.
pub fn render_view(view: View, snapshot: Option<&StatsSnapshot>, link: LinkStatus) -> Screen {
    let mut screen = Screen::new();

    match view {
        View::Splash => {
            screen.set_large(2, SPLASH_TEXT);
        }
        View::Searching => render_searching(&mut screen, link),
        View::Metric(metric) => render_metric(&mut screen, metric, snapshot),
        View::LinkInfo => {
            screen.set_line(0, "Bluetooth");
            screen.set_line(2, "connected?");
            screen.set_large(3, if link.is_connected() { "yes" } else { "no" });
        }
    }

    screen
}

fn render_searching(screen: &mut Screen, link: LinkStatus) {
    screen.set_line(0, BIKE_NAME);

    match link {
        LinkStatus::NotFound { attempts } => {
            screen.set_line(1, " not found.");
            let mut line: String<SCREEN_COLS> = String::new();
            let _ = write!(line, " Searched {} times", attempts);
            screen.set_line(4, &line);
        }
        LinkStatus::Disconnected => {
            screen.set_line(1, " disconnected");
            screen.set_line(4, " Searching...");
        }
        LinkStatus::Scanning | LinkStatus::Connected => {
            screen.set_line(4, " Searching...");
        }
    }
}

fn render_metric(screen: &mut Screen, metric: Metric, snapshot: Option<&StatsSnapshot>) {
    screen.set_line(0, metric.title());

    match snapshot {
        Some(snapshot) => {
            let mut value: String<LARGE_COLS> = String::new();
            let _ = write!(
                value,
                "{:.*}",
                metric.precision(),
                metric.value(snapshot)
            );
            screen.set_large(2, &value);
        }
        None => screen.set_large(2, NO_VALUE),
    }

    screen.set_line(5, metric.unit());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::LineSize;
    use crate::GraphicsBackend;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            cadence_rpm: 84.96,
            distance_km: 1.234,
            speed_kmh: 31.5,
        }
    }

    #[test]
    fn test_render_splash() {
        let screen = render_view(View::Splash, None, LinkStatus::Scanning);
        assert_eq!(screen.get_line(2), Some(SPLASH_TEXT));
        assert_eq!(screen.line_size(2), Some(LineSize::Large));
    }

    #[test]
    fn test_render_cadence() {
        let snap = snapshot();
        let screen = render_view(
            View::Metric(Metric::Cadence),
            Some(&snap),
            LinkStatus::Connected,
        );
        assert_eq!(screen.get_line(0), Some("Cadence"));
        assert_eq!(screen.get_line(2), Some("85.0"));
        assert_eq!(screen.get_line(5), Some("rpm"));
    }

    #[test]
    fn test_render_distance_two_decimals() {
        let snap = snapshot();
        let screen = render_view(
            View::Metric(Metric::Distance),
            Some(&snap),
            LinkStatus::Connected,
        );
        assert_eq!(screen.get_line(2), Some("1.23"));
        assert_eq!(screen.get_line(5), Some("km"));
    }

    #[test]
    fn test_render_metric_without_snapshot() {
        let screen = render_view(View::Metric(Metric::Speed), None, LinkStatus::Connected);
        assert_eq!(screen.get_line(0), Some("Speed"));
        assert_eq!(screen.get_line(2), Some("--"));
        assert_eq!(screen.get_line(5), Some("km/h"));
    }

    #[test]
    fn test_render_not_found() {
        let screen = render_view(
            View::Searching,
            None,
            LinkStatus::NotFound { attempts: 3 },
        );
        assert_eq!(screen.get_line(0), Some(BIKE_NAME));
        assert_eq!(screen.get_line(1), Some(" not found."));
        assert_eq!(screen.get_line(4), Some(" Searched 3 times"));
    }

    #[test]
    fn test_render_scanning() {
        let screen = render_view(View::Searching, None, LinkStatus::Scanning);
        assert_eq!(screen.get_line(1), Some(""));
        assert_eq!(screen.get_line(4), Some(" Searching..."));
    }

    #[test]
    fn test_render_link_info() {
        let connected = render_view(View::LinkInfo, None, LinkStatus::Connected);
        assert_eq!(connected.get_line(0), Some("Bluetooth"));
        assert_eq!(connected.get_line(2), Some("connected?"));
        assert_eq!(connected.get_line(3), Some("yes"));

        let lost = render_view(View::LinkInfo, None, LinkStatus::Disconnected);
        assert_eq!(lost.get_line(3), Some("no"));
    }

    #[test]
    fn test_same_view_same_screen() {
        let snap = snapshot();
        let view = View::Metric(Metric::Speed);
        let mut shown = render_view(view, Some(&snap), LinkStatus::Connected);
        shown.render_to(&mut GraphicsBackend::new(NullPanel)).unwrap();

        shown.update_from(&render_view(view, Some(&snap), LinkStatus::Connected));
        assert!(!shown.is_dirty());

        shown.update_from(&render_view(view, None, LinkStatus::Connected));
        assert!(shown.is_dirty());
    }

    /// Draw target that discards pixels
    struct NullPanel;

    impl OriginDimensions for NullPanel {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for NullPanel {
        type Color = BinaryColor;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }
    }
}
