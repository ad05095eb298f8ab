pub mod easing;
pub mod runner;

// Re-export commonly used types and functions for convenience
pub use easing::{EasingType, Lerp};
pub use runner::{
    AnimationId, AnimationRunner, AnimationState, FrameScheduler, ManualScheduler, OverlayFrame,
    PlacementAnimation,
};
