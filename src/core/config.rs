//! Configuration for a mosaic session
//!
//! A single [`MosaicConfig`] describes the initial map view, the palette,
//! the placement animation and the startup seed pixels. Animations can be
//! picked from presets through [`AnimationProfile`], the same way the map
//! engine picks performance presets.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::animation::easing::EasingType;
use crate::background::seed::SeedPixel;
use crate::core::{color::Color, constants, geo::LatLng};
use crate::{MosaicError, Result};

/// Visual style of the placement animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Scale and opacity ramp on the marker itself
    Pulse,
    /// Expanding ring that fades out
    Ripple,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationProfile {
    Pulse,
    Ripple,
    Disabled,
    Custom(AnimationConfig),
}

impl AnimationProfile {
    pub fn resolve(&self) -> AnimationConfig {
        match self {
            Self::Pulse => AnimationConfig {
                enabled: true,
                style: AnimationStyle::Pulse,
                duration_ms: constants::PLACEMENT_ANIMATION_MS,
                easing: EasingType::EaseOut,
                start_radius: constants::PIXEL_RADIUS,
                end_radius: constants::PIXEL_RADIUS,
                start_scale: 0.0,
                end_scale: 1.0,
                start_opacity: 1.0,
                end_opacity: 0.8,
            },
            Self::Ripple => AnimationConfig {
                enabled: true,
                style: AnimationStyle::Ripple,
                duration_ms: 1000,
                easing: EasingType::Linear,
                start_radius: constants::PIXEL_RADIUS,
                end_radius: constants::RIPPLE_MAX_RADIUS,
                start_scale: 1.0,
                end_scale: 1.0,
                start_opacity: 1.0,
                end_opacity: 0.0,
            },
            Self::Disabled => AnimationConfig {
                enabled: false,
                ..Self::Pulse.resolve()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for AnimationProfile {
    fn default() -> Self {
        Self::Pulse
    }
}

/// Placement animation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub style: AnimationStyle,
    pub duration_ms: u64,
    pub easing: EasingType,
    pub start_radius: f64,
    pub end_radius: f64,
    pub start_scale: f64,
    pub end_scale: f64,
    pub start_opacity: f32,
    pub end_opacity: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationProfile::default().resolve()
    }
}

/// Initial map view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewConfig {
    pub center: LatLng,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Credit line drawn in the map corner
    pub attribution: String,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        let (lat, lng) = constants::DEFAULT_CENTER;
        Self {
            center: LatLng::new(lat, lng),
            zoom: constants::DEFAULT_ZOOM,
            min_zoom: constants::DEFAULT_MIN_ZOOM,
            max_zoom: constants::DEFAULT_MAX_ZOOM,
            attribution: constants::DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: Vec<Color>,
    pub default_color: Color,
    /// Accept colors that are not part of `colors`
    pub allow_custom_colors: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: crate::state::palette::default_palette(),
            default_color: Color::from_literal(constants::DEFAULT_COLOR),
            allow_custom_colors: true,
        }
    }
}

/// Example pixels inserted once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    pub delay_ms: u64,
    pub max_jitter_ms: u64,
    pub examples: Vec<SeedPixel>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: constants::SEED_DELAY_MS,
            max_jitter_ms: constants::SEED_MAX_JITTER_MS,
            examples: crate::background::seed::default_examples(),
        }
    }
}

/// Top-level session configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MosaicConfig {
    pub map: MapViewConfig,
    pub palette: PaletteConfig,
    pub animation: AnimationConfig,
    pub seed: SeedConfig,
}

impl MosaicConfig {
    pub fn with_animation(mut self, profile: AnimationProfile) -> Self {
        self.animation = profile.resolve();
        self
    }

    pub fn without_seed(mut self) -> Self {
        self.seed.enabled = false;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.colors.is_empty() {
            return Err(MosaicError::Config("palette must contain at least one color".into()));
        }
        if !self.palette.allow_custom_colors
            && !self
                .palette
                .colors
                .iter()
                .any(|c| c.same_as(&self.palette.default_color))
        {
            return Err(MosaicError::Config(format!(
                "default color {} is not in the palette and custom colors are disabled",
                self.palette.default_color
            )));
        }
        if self.map.min_zoom > self.map.max_zoom {
            return Err(MosaicError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.map.min_zoom, self.map.max_zoom
            )));
        }
        if !self.map.center.is_finite() {
            return Err(MosaicError::Config("map center must be finite".into()));
        }
        if self.seed.max_jitter_ms > constants::SEED_MAX_JITTER_MS {
            return Err(MosaicError::Config(format!(
                "seed jitter {}ms exceeds the {}ms cap",
                self.seed.max_jitter_ms,
                constants::SEED_MAX_JITTER_MS
            )));
        }
        if self.animation.duration_ms == 0 {
            return Err(MosaicError::Config("animation duration must be positive".into()));
        }
        Ok(())
    }
}
