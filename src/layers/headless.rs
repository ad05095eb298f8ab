use crate::core::{
    geo::{LatLng, Point},
    viewport::Viewport,
};
use crate::layers::adapter::{MapLayerAdapter, OverlayId, OverlayShape, OverlaySurface};
use crate::prelude::HashMap;
use crate::state::pixels::{Pixel, PixelId};
use crate::{MosaicError, Result};

/// In-memory layer adapter backed by a [`Viewport`].
///
/// Keeps the last synced snapshot and the live overlays so headless hosts and
/// tests can inspect exactly what would be on screen. After [`teardown`]
/// every call fails, the way a destroyed map would.
///
/// [`teardown`]: HeadlessLayer::teardown
#[derive(Debug)]
pub struct HeadlessLayer {
    viewport: Viewport,
    rendered: Vec<Pixel>,
    sync_count: usize,
    overlays: HashMap<OverlayId, OverlayShape>,
    next_overlay: u64,
    overlays_created: usize,
    torn_down: bool,
    fail_syncs: bool,
}

impl HeadlessLayer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rendered: Vec::new(),
            sync_count: 0,
            overlays: HashMap::default(),
            next_overlay: 1,
            overlays_created: 0,
            torn_down: false,
            fail_syncs: false,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The pixels currently rendered, in render order
    pub fn rendered(&self) -> &[Pixel] {
        &self.rendered
    }

    pub fn rendered_ids(&self) -> Vec<PixelId> {
        self.rendered.iter().map(|p| p.id().clone()).collect()
    }

    pub fn sync_count(&self) -> usize {
        self.sync_count
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Total overlays ever created, including released ones
    pub fn overlays_created(&self) -> usize {
        self.overlays_created
    }

    /// Live animation overlays, in no particular order
    pub fn overlays(&self) -> impl Iterator<Item = &OverlayShape> {
        self.overlays.values()
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&OverlayShape> {
        self.overlays.get(&id)
    }

    /// Makes subsequent syncs fail while keeping overlays working
    pub fn set_sync_failure(&mut self, fail: bool) {
        self.fail_syncs = fail;
    }

    /// Simulates the map being destroyed: rendered state is dropped and
    /// every later call fails.
    pub fn teardown(&mut self) {
        log::info!("headless layer torn down");
        self.torn_down = true;
        self.rendered.clear();
        self.overlays.clear();
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.torn_down {
            Err(MosaicError::RenderSync("map layer has been torn down".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for HeadlessLayer {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl OverlaySurface for HeadlessLayer {
    fn add_overlay(&mut self, shape: OverlayShape) -> Result<OverlayId> {
        if self.torn_down {
            return Err(MosaicError::Overlay("map surface is gone".into()));
        }
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        self.overlays_created += 1;
        self.overlays.insert(id, shape);
        Ok(id)
    }

    fn update_overlay(&mut self, id: OverlayId, shape: OverlayShape) -> Result<()> {
        if self.torn_down {
            return Err(MosaicError::Overlay("map surface is gone".into()));
        }
        match self.overlays.get_mut(&id) {
            Some(existing) => {
                *existing = shape;
                Ok(())
            }
            None => Err(MosaicError::Overlay(format!("unknown overlay {:?}", id))),
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
    }
}

impl MapLayerAdapter for HeadlessLayer {
    fn sync_layer(&mut self, pixels: &[Pixel]) -> Result<()> {
        self.ensure_alive()?;
        if self.fail_syncs {
            return Err(MosaicError::RenderSync("layer rejected the snapshot".into()));
        }
        self.rendered = pixels.to_vec();
        self.sync_count += 1;
        log::debug!("layer synced: {} pixels", self.rendered.len());
        Ok(())
    }

    fn project(&self, coordinate: LatLng) -> Point {
        self.viewport.lat_lng_to_pixel(&coordinate)
    }
}
