use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Events the map surface reports to the core, already unprojected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Mouse/touch click on the map
    Click { lat_lng: LatLng },
    /// Mouse/touch move over the map
    PointerMove { lat_lng: LatLng },
    /// Pointer left the map area
    PointerLeave,
}

impl MapEvent {
    /// Builds a click from a container point using the host's unprojection
    pub fn click_at(point: Point, unproject: impl Fn(&Point) -> LatLng) -> Self {
        MapEvent::Click {
            lat_lng: unproject(&point),
        }
    }

    /// Gets the geographic position associated with this event, if any
    pub fn lat_lng(&self) -> Option<LatLng> {
        match self {
            MapEvent::Click { lat_lng } | MapEvent::PointerMove { lat_lng } => Some(*lat_lng),
            MapEvent::PointerLeave => None,
        }
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position() {
        let click = MapEvent::Click {
            lat_lng: LatLng::new(1.0, 2.0),
        };
        assert_eq!(click.lat_lng(), Some(LatLng::new(1.0, 2.0)));
        assert_eq!(MapEvent::PointerLeave.lat_lng(), None);
    }

    #[test]
    fn test_click_at_unprojects() {
        let event = MapEvent::click_at(Point::new(10.0, 20.0), |p| LatLng::new(p.y, p.x));
        assert_eq!(event.lat_lng(), Some(LatLng::new(20.0, 10.0)));
    }
}
