pub mod adapter;
pub mod headless;
pub mod macros;

// Re-export the essential types
pub use adapter::{MapLayerAdapter, OverlayId, OverlayShape, OverlaySurface};
pub use headless::HeadlessLayer;
