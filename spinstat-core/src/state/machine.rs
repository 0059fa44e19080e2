//! View state machine
//!
//! What the panel shows is a function of the current view and an event.

use super::events::{Button, Event};
use crate::metrics::StatsSnapshot;

/// Metric selectable for the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Metric {
    Cadence,
    Speed,
    Distance,
}

impl Metric {
    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Cadence => "Cadence",
            Metric::Speed => "Speed",
            Metric::Distance => "Distance",
        }
    }

    /// Unit label
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Cadence => "rpm",
            Metric::Speed => "km/h",
            Metric::Distance => "km",
        }
    }

    /// Decimal places shown on screen
    pub fn precision(&self) -> usize {
        match self {
            Metric::Distance => 2,
            _ => 1,
        }
    }

    /// Pick this metric's value out of a snapshot
    pub fn value(&self, snapshot: &StatsSnapshot) -> f64 {
        match self {
            Metric::Cadence => snapshot.cadence_rpm,
            Metric::Speed => snapshot.speed_kmh,
            Metric::Distance => snapshot.distance_km,
        }
    }
}

/// Views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum View {
    /// Power-on banner
    #[default]
    Splash,
    /// Waiting for the bridge to find the bike
    Searching,
    /// One metric, full screen
    Metric(Metric),
    /// Bluetooth connection state
    LinkInfo,
}

impl View {
    /// Metric shown by this view, if any
    pub fn metric(&self) -> Option<Metric> {
        match self {
            View::Metric(metric) => Some(*metric),
            _ => None,
        }
    }

    /// Process an event and return the next view
    pub fn transition(self, event: Event) -> Self {
        use Event::*;

        match (self, event) {
            (View::Splash, BootComplete) => View::Searching,

            // Cadence is the default metric once the bike shows up
            (View::Searching, LinkUp) => View::Metric(Metric::Cadence),

            (View::Metric(_), LinkDown) => View::Searching,

            (View::Metric(_) | View::LinkInfo, ButtonPressed(button)) => match button {
                Button::Cadence => View::Metric(Metric::Cadence),
                Button::Speed => View::Metric(Metric::Speed),
                Button::Distance => View::Metric(Metric::Distance),
                Button::Link => View::LinkInfo,
            },
            (View::Searching, ButtonPressed(Button::Link)) => View::LinkInfo,

            // Default: stay in current view
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_to_searching() {
        assert_eq!(View::Splash.transition(Event::BootComplete), View::Searching);
    }

    #[test]
    fn test_link_up_shows_cadence() {
        assert_eq!(
            View::Searching.transition(Event::LinkUp),
            View::Metric(Metric::Cadence)
        );
    }

    #[test]
    fn test_buttons_select_metric() {
        let view = View::Metric(Metric::Cadence);

        let speed = view.transition(Event::ButtonPressed(Button::Speed));
        assert_eq!(speed, View::Metric(Metric::Speed));

        let distance = speed.transition(Event::ButtonPressed(Button::Distance));
        assert_eq!(distance, View::Metric(Metric::Distance));

        let link = distance.transition(Event::ButtonPressed(Button::Link));
        assert_eq!(link, View::LinkInfo);

        let cadence = link.transition(Event::ButtonPressed(Button::Cadence));
        assert_eq!(cadence, View::Metric(Metric::Cadence));
    }

    #[test]
    fn test_link_down_returns_to_searching() {
        for metric in [Metric::Cadence, Metric::Speed, Metric::Distance] {
            assert_eq!(
                View::Metric(metric).transition(Event::LinkDown),
                View::Searching
            );
        }
    }

    #[test]
    fn test_link_info_survives_link_changes() {
        assert_eq!(View::LinkInfo.transition(Event::LinkDown), View::LinkInfo);
        assert_eq!(View::LinkInfo.transition(Event::LinkUp), View::LinkInfo);
    }

    #[test]
    fn test_metric_buttons_ignored_while_searching() {
        for button in [Button::Cadence, Button::Speed, Button::Distance] {
            assert_eq!(
                View::Searching.transition(Event::ButtonPressed(button)),
                View::Searching
            );
        }
        assert_eq!(
            View::Searching.transition(Event::ButtonPressed(Button::Link)),
            View::LinkInfo
        );
    }

    #[test]
    fn test_splash_ignores_buttons() {
        for button in Button::ALL {
            assert_eq!(
                View::Splash.transition(Event::ButtonPressed(button)),
                View::Splash
            );
        }
    }

    #[test]
    fn test_metric_value() {
        let snapshot = StatsSnapshot {
            cadence_rpm: 85.0,
            distance_km: 1.25,
            speed_kmh: 31.5,
        };
        assert_eq!(Metric::Cadence.value(&snapshot), 85.0);
        assert_eq!(Metric::Speed.value(&snapshot), 31.5);
        assert_eq!(Metric::Distance.value(&snapshot), 1.25);
        assert_eq!(Metric::Speed.unit(), "km/h");
    }

    #[test]
    fn test_view_metric() {
        assert_eq!(View::Metric(Metric::Speed).metric(), Some(Metric::Speed));
        assert_eq!(View::LinkInfo.metric(), None);
    }
}
