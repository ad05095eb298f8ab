//! # MapMosaic
//!
//! Pixel placement state and map-layer synchronization for world-map mosaics.
//!
//! Users click on a map to drop colored "pixels" chosen from a palette. This
//! crate owns the authoritative record of those pixels, keeps the rendered
//! map layer consistent with it, and drives the cosmetic placement animation.
//! Map rendering itself (tiles, pan/zoom, widgets) lives behind the
//! [`MapLayerAdapter`] boundary.

pub mod animation;
pub mod background;
pub mod core;
pub mod input;
pub mod layers;
pub mod placement;
pub mod prelude;
pub mod session;
pub mod state;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    color::Color,
    config::MosaicConfig,
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use state::{
    id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator},
    palette::PaletteStore,
    pixels::{Pixel, PixelId, PixelStore},
};

pub use layers::{
    adapter::{MapLayerAdapter, OverlayId, OverlayShape, OverlaySurface},
    headless::HeadlessLayer,
};

pub use animation::{
    easing::EasingType,
    runner::{AnimationRunner, AnimationState, FrameScheduler, ManualScheduler},
};

pub use placement::controller::PlacementController;

pub use input::{events::MapEvent, handler::InputHandler};

pub use ui::events::{EventBus, UiEvent};

pub use background::seed::{SeedLoader, SeedPixel, SeedReport, SeedSchedule};

pub use session::MosaicSession;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Common error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MosaicError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Render sync failure: {0}")]
    RenderSync(String),

    #[error("Overlay error: {0}")]
    Overlay(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Error type alias for convenience
pub type Error = MosaicError;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Safe to call more than once; only the first call takes effect.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("mapmosaic=info"),
    )
    .is_test(cfg!(test))
    .try_init();
}
