use crossbeam_channel::Receiver;
use std::time::Duration;

use crate::animation::runner::AnimationRunner;
use crate::core::{color::Color, geo::LatLng};
use crate::layers::adapter::MapLayerAdapter;
use crate::state::{
    id::{IdGenerator, SequentialIdGenerator},
    palette::PaletteStore,
    pixels::{Pixel, PixelStore},
};
use crate::ui::events::{EventBus, UiEvent};
use crate::{MosaicError, Result};

/// Turns placement requests into store mutations, layer syncs and animations.
///
/// `place` runs its three effects (append, sync, animate) inside one call, so
/// with a single-threaded host no other placement can interleave between the
/// store changing and the layer being told about it.
pub struct PlacementController<L: MapLayerAdapter> {
    pixels: PixelStore,
    palette: PaletteStore,
    layer: L,
    animations: AnimationRunner,
    ids: Box<dyn IdGenerator>,
    events: EventBus,
    epoch: instant::Instant,
    layer_in_sync: bool,
}

impl<L: MapLayerAdapter> PlacementController<L> {
    pub fn new(
        palette: PaletteStore,
        pixels: PixelStore,
        layer: L,
        animations: AnimationRunner,
    ) -> Self {
        let mut controller = Self {
            pixels,
            palette,
            layer,
            animations,
            ids: Box::new(SequentialIdGenerator::new()),
            events: EventBus::new(),
            epoch: instant::Instant::now(),
            layer_in_sync: true,
        };
        // A store handed over with pixels must be visible before the first place
        if !controller.pixels.is_empty() {
            controller.sync();
        }
        controller
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Places a pixel at `coordinate`, using the active palette color unless
    /// `color` is given.
    ///
    /// Fails with `InvalidCoordinate` for non-finite input, with
    /// `InvalidColor` for an explicit color a strict palette does not hold,
    /// and with `InvariantViolation` for a repeated id. Nothing changes on
    /// failure.
    /// A layer that refuses the sync does not fail the placement: the store
    /// is authoritative and the layer is reconciled on the next sync.
    pub fn place(&mut self, coordinate: LatLng, color: Option<Color>) -> Result<Pixel> {
        coordinate.ensure_finite()?;

        let color = match color {
            Some(color) if !self.palette.accepts(&color) => {
                return Err(MosaicError::InvalidColor(format!(
                    "{} is not in the palette",
                    color
                )));
            }
            Some(color) => color,
            None => self.palette.current().clone(),
        };
        let pixel = Pixel::new(self.ids.next_id(), coordinate, color, self.epoch.elapsed());
        let total = self.pixels.append(pixel.clone())?;

        self.sync();

        let anchor = self.layer.project(coordinate);
        self.animations.play(&pixel, anchor);

        log::debug!(
            "placed {} at {} in {} ({} total)",
            pixel.id(),
            coordinate,
            pixel.color(),
            total
        );
        self.events.emit(UiEvent::PixelPlaced {
            pixel: pixel.clone(),
            total,
        });

        Ok(pixel)
    }

    fn sync(&mut self) {
        match self.layer.sync_layer(self.pixels.all()) {
            Ok(()) => self.layer_in_sync = true,
            Err(e) => {
                log::warn!(
                    "layer sync failed, {} pixels kept in store: {}",
                    self.pixels.count(),
                    e
                );
                self.layer_in_sync = false;
            }
        }
    }

    /// Pushes the full store to the layer again, e.g. after a failed sync
    pub fn resync(&mut self) -> Result<()> {
        let result = self.layer.sync_layer(self.pixels.all());
        self.layer_in_sync = result.is_ok();
        result
    }

    /// Whether the last sync attempt reached the layer
    pub fn is_layer_in_sync(&self) -> bool {
        self.layer_in_sync
    }

    /// Changes the active color; returns whether it changed
    pub fn select_color(&mut self, color: &str) -> bool {
        let changed = self.palette.select(color);
        if changed {
            self.events.emit(UiEvent::ActiveColorChanged {
                color: self.palette.current().clone(),
            });
        }
        changed
    }

    pub fn select_color_index(&mut self, index: usize) -> bool {
        match self.palette.colors().get(index) {
            Some(color) => {
                let color = color.as_str().to_string();
                self.select_color(&color)
            }
            None => false,
        }
    }

    /// Advances placement animations by `dt`; returns how many still run
    pub fn tick(&mut self, dt: Duration) -> usize {
        let running = self.animations.tick(&mut self.layer, dt);
        self.animations.prune_finished();
        running
    }

    /// Stops all animations and releases their overlays
    pub fn teardown(&mut self) {
        self.animations.cancel_all(&mut self.layer);
        self.animations.prune_finished();
        log::info!("placement controller torn down with {} pixels", self.pixels.count());
    }

    pub fn emit(&mut self, event: UiEvent) {
        self.events.emit(event);
    }

    pub fn subscribe(&mut self) -> Receiver<UiEvent> {
        self.events.subscribe()
    }

    pub fn pixels(&self) -> &PixelStore {
        &self.pixels
    }

    pub fn palette(&self) -> &PaletteStore {
        &self.palette
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn animations(&self) -> &AnimationRunner {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationRunner {
        &mut self.animations
    }
}
