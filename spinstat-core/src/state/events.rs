//! Events that trigger view transitions

/// The four front-panel keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Show cadence
    Cadence,
    /// Show speed
    Speed,
    /// Show distance
    Distance,
    /// Show link status
    Link,
}

impl Button {
    /// All keys, in panel order
    pub const ALL: [Button; 4] = [Button::Cadence, Button::Speed, Button::Distance, Button::Link];
}

/// Events that can trigger view transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Splash screen has been shown long enough
    BootComplete,
    /// Bridge reports the sensor connected
    LinkUp,
    /// Bridge reports the sensor lost or not found
    LinkDown,
    /// A key was pressed
    ButtonPressed(Button),
}

impl Event {
    /// Check if this event is user-initiated
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::ButtonPressed(_))
    }

    /// Check if this event comes from the bridge link
    pub fn is_link_event(&self) -> bool {
        matches!(self, Event::LinkUp | Event::LinkDown)
    }
}
