use once_cell::sync::Lazy;

use crate::core::{color::Color, config::PaletteConfig, constants};

static DEFAULT_PALETTE: Lazy<Vec<Color>> = Lazy::new(|| {
    constants::DEFAULT_PALETTE
        .iter()
        .map(|c| Color::from_literal(c))
        .collect()
});

/// The preset colors, in display order
pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE.clone()
}

/// Fixed, ordered set of selectable colors plus the active color.
///
/// The active color is always a non-empty value; it changes only through
/// [`PaletteStore::select`] or [`PaletteStore::select_index`].
#[derive(Debug, Clone)]
pub struct PaletteStore {
    colors: Vec<Color>,
    active: Color,
    allow_custom: bool,
}

impl PaletteStore {
    pub fn new(colors: Vec<Color>, active: Color) -> Self {
        Self {
            colors,
            active,
            allow_custom: true,
        }
    }

    pub fn from_config(config: &PaletteConfig) -> Self {
        Self::new(config.colors.clone(), config.default_color.clone())
            .with_custom_colors(config.allow_custom_colors)
    }

    /// Whether colors outside the preset list may become active
    pub fn with_custom_colors(mut self, allow: bool) -> Self {
        self.allow_custom = allow;
        self
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn current(&self) -> &Color {
        &self.active
    }

    /// Makes `color` the active color. Returns whether the active color changed.
    ///
    /// Empty input is ignored. With custom colors disabled, values outside the
    /// palette are ignored too.
    pub fn select(&mut self, color: &str) -> bool {
        let Some(color) = Color::parse(color) else {
            log::warn!("ignoring empty color selection");
            return false;
        };

        if !self.accepts(&color) {
            log::warn!("ignoring color {} outside the palette", color);
            return false;
        }

        if color == self.active {
            return false;
        }

        log::debug!("active color {} -> {}", self.active, color);
        self.active = color;
        true
    }

    /// Selects the palette entry at `index`, if there is one
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.colors.get(index) {
            Some(color) => {
                let color = color.as_str().to_string();
                self.select(&color)
            }
            None => false,
        }
    }

    /// Whether `color` may be used: always with custom colors allowed,
    /// otherwise only palette entries
    pub fn accepts(&self, color: &Color) -> bool {
        self.allow_custom || self.contains(color)
    }

    pub fn contains(&self, color: &Color) -> bool {
        self.position(color).is_some()
    }

    pub fn position(&self, color: &Color) -> Option<usize> {
        self.colors.iter().position(|c| c.same_as(color))
    }

    /// For highlighting the active swatch
    pub fn is_active(&self, color: &Color) -> bool {
        self.active.same_as(color)
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::new(default_palette(), Color::from_literal(constants::DEFAULT_COLOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = PaletteStore::default();
        assert_eq!(palette.colors().len(), 15);
        assert_eq!(palette.current().as_str(), "#ff6b6b");
        assert_eq!(palette.colors()[14].as_str(), "#fd79a8");
        assert!(palette.is_active(&Color::parse("#FF6B6B").unwrap()));
    }

    #[test]
    fn test_select_accepts_custom_colors() {
        let mut palette = PaletteStore::default();
        assert!(palette.select("#123456"));
        assert_eq!(palette.current().as_str(), "#123456");
        assert!(!palette.contains(palette.current()));

        // Malformed values are still accepted; rendering degrades instead
        assert!(palette.select("not-a-color"));
        assert_eq!(palette.current().as_str(), "not-a-color");
    }

    #[test]
    fn test_select_ignores_empty_and_repeats() {
        let mut palette = PaletteStore::default();
        assert!(!palette.select(""));
        assert!(!palette.select("   "));
        assert_eq!(palette.current().as_str(), "#ff6b6b");
        assert!(!palette.select("#ff6b6b"));
    }

    #[test]
    fn test_strict_palette_rejects_unknown_colors() {
        let mut palette = PaletteStore::default().with_custom_colors(false);
        assert!(!palette.select("#123456"));
        assert_eq!(palette.current().as_str(), "#ff6b6b");
        assert!(palette.select("#4ECDC4"));
    }

    #[test]
    fn test_select_index() {
        let mut palette = PaletteStore::default();
        assert!(palette.select_index(2));
        assert_eq!(palette.current().as_str(), "#45b7d1");
        assert_eq!(palette.position(palette.current()), Some(2));
        assert!(!palette.select_index(99));
        assert_eq!(palette.current().as_str(), "#45b7d1");
    }
}
