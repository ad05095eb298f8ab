pub mod color;
pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;

// Re-export commonly used types for convenience
pub use color::Color;
pub use config::{
    AnimationConfig, AnimationProfile, AnimationStyle, MapViewConfig, MosaicConfig, PaletteConfig,
    SeedConfig,
};
pub use geo::{LatLng, Point};
pub use viewport::Viewport;
