//! Engine-wide defaults for the mosaic: palette, initial view, seed and
//! animation timings. Keeping them in a single place makes it easier to
//! tweak magic numbers.

/// Preset palette shown in the color grid, in display order.
pub const DEFAULT_PALETTE: [&str; 15] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#feca57", "#ff9ff3", "#54a0ff", "#5f27cd",
    "#00d2d3", "#ff9f43", "#10ac84", "#ee5a24", "#0984e3", "#a29bfe", "#fd79a8",
];

/// Active color when the session starts.
pub const DEFAULT_COLOR: &str = "#ff6b6b";

/// Initial map center (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (30.0, 110.0);

/// Initial map zoom.
pub const DEFAULT_ZOOM: f64 = 3.0;

pub const DEFAULT_MIN_ZOOM: f64 = 1.0;

pub const DEFAULT_MAX_ZOOM: f64 = 20.0;

/// Credit for the map data the viewer draws over.
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap, © CartoDB";

/// Square tile size in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Delay before example pixels are inserted at startup.
pub const SEED_DELAY_MS: u64 = 1000;

/// Upper bound for the random per-item delay of a seed pixel.
pub const SEED_MAX_JITTER_MS: u64 = 1000;

/// Length of a placement animation.
pub const PLACEMENT_ANIMATION_MS: u64 = 600;

/// Radius of a persisted pixel marker, in screen pixels.
pub const PIXEL_RADIUS: f64 = 6.0;

/// Radius a ripple overlay grows to.
pub const RIPPLE_MAX_RADIUS: f64 = 30.0;

/// Decimal places shown in the coordinate readout.
pub const READOUT_DECIMALS: usize = 4;
