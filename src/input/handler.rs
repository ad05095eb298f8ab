use std::collections::VecDeque;

use crate::{
    core::{constants::READOUT_DECIMALS, geo::LatLng},
    input::events::{EventHandled, MapEvent},
    layers::adapter::MapLayerAdapter,
    placement::controller::PlacementController,
    state::pixels::Pixel,
    ui::events::UiEvent,
    Result,
};

/// Routes map events into the placement controller.
///
/// Events can be handled immediately or queued from a callback and
/// processed once per frame.
#[derive(Debug, Default)]
pub struct InputHandler {
    queue: VecDeque<MapEvent>,
    cursor: Option<LatLng>,
    failed_placements: usize,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next [`process_events`](Self::process_events)
    pub fn push(&mut self, event: MapEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Handles every queued event in arrival order
    pub fn process_events<L: MapLayerAdapter>(
        &mut self,
        controller: &mut PlacementController<L>,
    ) -> Vec<Result<Pixel>> {
        let mut placed = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            if let MapEvent::Click { lat_lng } = event {
                placed.push(self.place(controller, lat_lng));
            } else {
                self.handle(controller, event);
            }
        }
        placed
    }

    pub fn handle<L: MapLayerAdapter>(
        &mut self,
        controller: &mut PlacementController<L>,
        event: MapEvent,
    ) -> EventHandled {
        match event {
            MapEvent::Click { lat_lng } => match self.place(controller, lat_lng) {
                Ok(_) => EventHandled::Handled,
                Err(_) => EventHandled::NotHandled,
            },
            MapEvent::PointerMove { lat_lng } => {
                if !lat_lng.is_finite() {
                    return EventHandled::NotHandled;
                }
                self.cursor = Some(lat_lng);
                controller.emit(UiEvent::PointerMoved {
                    lat_lng,
                    readout: lat_lng.readout(READOUT_DECIMALS),
                });
                EventHandled::Handled
            }
            MapEvent::PointerLeave => {
                self.cursor = None;
                EventHandled::Handled
            }
        }
    }

    fn place<L: MapLayerAdapter>(
        &mut self,
        controller: &mut PlacementController<L>,
        lat_lng: LatLng,
    ) -> Result<Pixel> {
        let result = controller.place(lat_lng, None);
        if let Err(e) = &result {
            self.failed_placements += 1;
            log::warn!("click at {} not placed: {}", lat_lng, e);
        }
        result
    }

    /// Last known pointer position over the map
    pub fn cursor(&self) -> Option<LatLng> {
        self.cursor
    }

    pub fn failed_placements(&self) -> usize {
        self.failed_placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::runner::AnimationRunner;
    use crate::core::config::AnimationConfig;
    use crate::layers::headless::HeadlessLayer;
    use crate::state::{palette::PaletteStore, pixels::PixelStore};

    fn controller() -> PlacementController<HeadlessLayer> {
        PlacementController::new(
            PaletteStore::default(),
            PixelStore::new(),
            HeadlessLayer::default(),
            AnimationRunner::new(AnimationConfig::default()),
        )
    }

    #[test]
    fn test_click_places_pixel() {
        let mut controller = controller();
        let mut handler = InputHandler::new();
        let handled = handler.handle(
            &mut controller,
            MapEvent::Click {
                lat_lng: LatLng::new(48.8566, 2.3522),
            },
        );
        assert_eq!(handled, EventHandled::Handled);
        assert_eq!(controller.pixels().count(), 1);
    }

    #[test]
    fn test_invalid_click_is_not_handled() {
        let mut controller = controller();
        let mut handler = InputHandler::new();
        let handled = handler.handle(
            &mut controller,
            MapEvent::Click {
                lat_lng: LatLng::new(f64::NAN, 0.0),
            },
        );
        assert_eq!(handled, EventHandled::NotHandled);
        assert_eq!(handler.failed_placements(), 1);
        assert_eq!(controller.pixels().count(), 0);
    }

    #[test]
    fn test_pointer_move_emits_readout() {
        let mut controller = controller();
        let events = controller.subscribe();
        let mut handler = InputHandler::new();
        handler.handle(
            &mut controller,
            MapEvent::PointerMove {
                lat_lng: LatLng::new(30.0, 110.0),
            },
        );
        assert_eq!(handler.cursor(), Some(LatLng::new(30.0, 110.0)));
        match events.try_recv().unwrap() {
            UiEvent::PointerMoved { readout, .. } => assert_eq!(readout, "30.0000, 110.0000"),
            other => panic!("unexpected event {:?}", other),
        }

        handler.handle(&mut controller, MapEvent::PointerLeave);
        assert_eq!(handler.cursor(), None);
    }

    #[test]
    fn test_queued_events_processed_in_order() {
        let mut controller = controller();
        let mut handler = InputHandler::new();
        handler.push(MapEvent::Click {
            lat_lng: LatLng::new(1.0, 1.0),
        });
        handler.push(MapEvent::PointerMove {
            lat_lng: LatLng::new(2.0, 2.0),
        });
        handler.push(MapEvent::Click {
            lat_lng: LatLng::new(3.0, 3.0),
        });
        assert_eq!(handler.pending(), 3);

        let results = handler.process_events(&mut controller);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));
        let lats: Vec<f64> = controller
            .pixels()
            .iter()
            .map(|p| p.coordinate().lat)
            .collect();
        assert_eq!(lats, vec![1.0, 3.0]);
        assert_eq!(handler.pending(), 0);
    }
}
