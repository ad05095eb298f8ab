use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::{color::Color, geo::LatLng};
use crate::state::pixels::Pixel;

/// Notifications for the UI chrome (counter, palette, coordinate readout)
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A pixel was placed; `total` is the store size afterwards
    PixelPlaced { pixel: Pixel, total: usize },
    /// The active palette color changed
    ActiveColorChanged { color: Color },
    /// The pointer moved over the map
    PointerMoved { lat_lng: LatLng, readout: String },
}

/// Fan-out of [`UiEvent`]s to any number of subscribers.
///
/// Subscribers that dropped their receiver are pruned on the next emit.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<UiEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<UiEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: UiEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_subscriber_receives_events() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        let color = Color::parse("#123456").unwrap();
        bus.emit(UiEvent::ActiveColorChanged {
            color: color.clone(),
        });

        for rx in [&a, &b] {
            assert_eq!(
                rx.try_recv().unwrap(),
                UiEvent::ActiveColorChanged {
                    color: color.clone()
                }
            );
        }
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(UiEvent::PointerMoved {
            lat_lng: LatLng::new(1.0, 2.0),
            readout: "1.0000, 2.0000".into(),
        });
        assert_eq!(bus.subscriber_count(), 1);
        assert!(keep.try_recv().is_ok());
    }
}
