//! The composition root of a running mosaic
//!
//! A [`MosaicSession`] is built once at startup from a [`MosaicConfig`]: it
//! creates the palette, the empty pixel store, the animation runner and the
//! placement controller, and optionally the startup seed schedule. Hosts feed
//! it map events and frame ticks and drop it at shutdown. Nothing is global,
//! so tests simply build a fresh session each time.

use crossbeam_channel::Receiver;
use std::time::Duration;

use crate::animation::runner::{AnimationRunner, FrameScheduler};
use crate::background::seed::{SeedLoader, SeedSchedule};
use crate::core::{
    color::Color,
    config::MosaicConfig,
    geo::{LatLng, Point},
    viewport::Viewport,
};
use crate::input::{
    events::{EventHandled, MapEvent},
    handler::InputHandler,
};
use crate::layers::{adapter::MapLayerAdapter, headless::HeadlessLayer};
use crate::placement::controller::PlacementController;
use crate::state::{
    palette::PaletteStore,
    pixels::{Pixel, PixelStore},
};
use crate::ui::events::UiEvent;
use crate::Result;

pub struct MosaicSession<L: MapLayerAdapter = HeadlessLayer> {
    config: MosaicConfig,
    controller: PlacementController<L>,
    input: InputHandler,
    seed: Option<SeedSchedule>,
}

impl MosaicSession<HeadlessLayer> {
    /// Session rendering into an in-memory layer of the given screen size
    pub fn headless(config: MosaicConfig, size: Point) -> Result<Self> {
        let viewport = Viewport::new(config.map.center, config.map.zoom, size)
            .with_zoom_limits(config.map.min_zoom, config.map.max_zoom);
        Self::with_layer(config, HeadlessLayer::new(viewport))
    }
}

impl<L: MapLayerAdapter> MosaicSession<L> {
    pub fn with_layer(config: MosaicConfig, layer: L) -> Result<Self> {
        config.validate()?;

        let palette = PaletteStore::from_config(&config.palette);
        let animations = AnimationRunner::new(config.animation.clone());
        let controller = PlacementController::new(palette, PixelStore::new(), layer, animations);

        let seed = if config.seed.enabled && !config.seed.examples.is_empty() {
            Some(SeedLoader::from_config(&config.seed).schedule(config.seed.examples.clone()))
        } else {
            None
        };

        log::info!(
            "session started at {} zoom {} with {} palette colors",
            config.map.center,
            config.map.zoom,
            config.palette.colors.len()
        );

        Ok(Self {
            config,
            controller,
            input: InputHandler::new(),
            seed,
        })
    }

    /// Routes animation frame requests to the host
    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.controller.animations_mut().set_scheduler(scheduler);
        self
    }

    pub fn handle_event(&mut self, event: MapEvent) -> EventHandled {
        self.input.handle(&mut self.controller, event)
    }

    /// Queue an event from a callback; it is handled on the next tick
    pub fn queue_event(&mut self, event: MapEvent) {
        self.input.push(event);
    }

    pub fn place(&mut self, coordinate: LatLng, color: Option<Color>) -> Result<Pixel> {
        self.controller.place(coordinate, color)
    }

    pub fn select_color(&mut self, color: &str) -> bool {
        self.controller.select_color(color)
    }

    /// One host frame: queued input, due seed pixels, then animations.
    /// Returns the number of animations still running.
    pub fn tick(&mut self, dt: Duration) -> usize {
        self.input.process_events(&mut self.controller);

        if let Some(seed) = self.seed.as_mut() {
            seed.poll(dt, &mut self.controller);
            if seed.is_done() {
                let report = seed.report();
                log::info!(
                    "startup seeding done: {} placed, {} failed",
                    report.placed_count(),
                    report.failed_count()
                );
                self.seed = None;
            }
        }

        self.controller.tick(dt)
    }

    pub fn subscribe(&mut self) -> Receiver<UiEvent> {
        self.controller.subscribe()
    }

    pub fn is_seeding(&self) -> bool {
        self.seed.is_some()
    }

    /// Hands the startup seeding to the caller, e.g. to run the async loader
    pub fn take_seed_schedule(&mut self) -> Option<SeedSchedule> {
        self.seed.take()
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn controller(&self) -> &PlacementController<L> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlacementController<L> {
        &mut self.controller
    }

    pub fn pixels(&self) -> &PixelStore {
        self.controller.pixels()
    }

    pub fn palette(&self) -> &PaletteStore {
        self.controller.palette()
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Ends the session, cancelling animations. Returns the final pixel count.
    pub fn shutdown(mut self) -> usize {
        self.controller.teardown();
        let count = self.controller.pixels().count();
        log::info!("session ended with {} pixels", count);
        count
    }
}
