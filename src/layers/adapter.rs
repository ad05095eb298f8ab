use serde::{Deserialize, Serialize};

use crate::core::{
    color::Color,
    config::AnimationStyle,
    geo::{LatLng, Point},
};
use crate::state::pixels::Pixel;
use crate::Result;

/// Handle for a transient overlay drawn on the map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(pub u64);

/// A transient visual drawn on top of the persisted pixel layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayShape {
    pub style: AnimationStyle,
    /// Geographic anchor, so hosts can re-project while the map moves
    pub coordinate: LatLng,
    /// Screen position of the anchor when the animation started
    pub anchor: Point,
    pub color: Color,
    /// Radius in screen pixels
    pub radius: f64,
    pub scale: f64,
    pub opacity: f32,
}

/// Surface accepting transient overlays (placement animations).
///
/// Overlays are additive: they never replace or modify the pixel layer.
pub trait OverlaySurface {
    fn add_overlay(&mut self, shape: OverlayShape) -> Result<OverlayId>;

    fn update_overlay(&mut self, id: OverlayId, shape: OverlayShape) -> Result<()>;

    /// Releases an overlay. Unknown ids are ignored.
    fn remove_overlay(&mut self, id: OverlayId);
}

/// Boundary to the map library that renders placed pixels.
///
/// The core never reaches into the adapter's own representation: it hands
/// over a complete snapshot of the store on every sync.
pub trait MapLayerAdapter: OverlaySurface {
    /// Replaces the rendered pixel layer with `pixels`, in order
    fn sync_layer(&mut self, pixels: &[Pixel]) -> Result<()>;

    /// Geographic coordinate to container (screen) point
    fn project(&self, coordinate: LatLng) -> Point;
}

crate::forward_layer_adapter!(Box<T>);
