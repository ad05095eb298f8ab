use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{color::Color, geo::LatLng};
use crate::prelude::HashSet;
use crate::{MosaicError, Result};

/// Opaque pixel identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelId(String);

impl PixelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PixelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A colored marker placed at a geographic coordinate. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    id: PixelId,
    coordinate: LatLng,
    color: Color,
    /// Time since the session epoch, for ordering and debugging only
    created_at: Duration,
}

impl Pixel {
    pub fn new(id: PixelId, coordinate: LatLng, color: Color, created_at: Duration) -> Self {
        Self {
            id,
            coordinate,
            color,
            created_at,
        }
    }

    pub fn id(&self) -> &PixelId {
        &self.id
    }

    pub fn coordinate(&self) -> LatLng {
        self.coordinate
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn created_at(&self) -> Duration {
        self.created_at
    }
}

/// Append-only, insertion-ordered record of placed pixels.
///
/// This is the authoritative state; the rendered layer is always derived
/// from [`PixelStore::all`].
#[derive(Debug, Default)]
pub struct PixelStore {
    pixels: Vec<Pixel>,
    ids: HashSet<PixelId>,
}

impl PixelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pixel and returns the new count.
    ///
    /// A repeated id is a programming error and leaves the store untouched.
    pub fn append(&mut self, pixel: Pixel) -> Result<usize> {
        if self.ids.contains(pixel.id()) {
            return Err(MosaicError::InvariantViolation(format!(
                "pixel id {} is already in the store",
                pixel.id()
            )));
        }

        self.ids.insert(pixel.id().clone());
        self.pixels.push(pixel);
        Ok(self.pixels.len())
    }

    /// Every appended pixel, in placement order
    pub fn all(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn contains(&self, id: &PixelId) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &PixelId) -> Option<&Pixel> {
        if !self.contains(id) {
            return None;
        }
        self.pixels.iter().find(|p| p.id() == id)
    }

    pub fn last(&self) -> Option<&Pixel> {
        self.pixels.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pixel> {
        self.pixels.iter()
    }
}

impl<'a> IntoIterator for &'a PixelStore {
    type Item = &'a Pixel;
    type IntoIter = std::slice::Iter<'a, Pixel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
