//! Prelude module for common mapmosaic types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmosaic::prelude::*;`

pub use crate::core::{
    color::Color,
    config::{
        AnimationConfig, AnimationProfile, AnimationStyle, MapViewConfig, MosaicConfig,
        PaletteConfig, SeedConfig,
    },
    geo::{LatLng, Point},
    viewport::Viewport,
};

pub use crate::state::{
    id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator},
    palette::PaletteStore,
    pixels::{Pixel, PixelId, PixelStore},
};

pub use crate::layers::{
    adapter::{MapLayerAdapter, OverlayId, OverlayShape, OverlaySurface},
    headless::HeadlessLayer,
};

pub use crate::animation::{
    easing::{EasingType, Lerp},
    runner::{
        AnimationId, AnimationRunner, AnimationState, FrameScheduler, ManualScheduler,
        OverlayFrame,
    },
};

pub use crate::placement::controller::PlacementController;

pub use crate::input::{
    events::{EventHandled, MapEvent},
    handler::InputHandler,
};

pub use crate::ui::events::{EventBus, UiEvent};

pub use crate::background::seed::{
    default_examples, Delay, NoDelay, SeedLoader, SeedPixel, SeedReport, SeedSchedule,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::background::seed::{load_examples, TokioDelay};

pub use crate::session::MosaicSession;

pub use crate::{Error as MosaicError, Result};

pub use std::time::Duration;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
