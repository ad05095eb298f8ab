use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
///
/// Used by headless hosts and the desktop viewer to project pixel coordinates
/// onto the screen. All conversions use spherical Web Mercator (EPSG:3857).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom,
            size,
            min_zoom: 0.0,
            max_zoom: 20.0,
        }
    }

    /// Sets the zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.set_zoom_limits(min_zoom, max_zoom);
        self
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = center.normalized();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let world = TILE_SIZE * 2_f64.powf(z);

        let lat = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let x = (lat_lng.lng + 180.0) / 360.0 * world;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * world;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let world = TILE_SIZE * 2_f64.powf(z);

        let lng = pixel.x / world * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * pixel.y / world);
        let lat = n.sinh().atan().to_degrees();

        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container (screen) coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.project(&self.center, None);
        let projected = self.project(lat_lng, None);
        projected
            .subtract(&origin)
            .add(&Point::new(self.size.x / 2.0, self.size.y / 2.0))
    }

    /// Converts container (screen) coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center, None);
        let world = pixel
            .subtract(&Point::new(self.size.x / 2.0, self.size.y / 2.0))
            .add(&origin);
        self.unproject(&world, None)
    }

    /// Pans the viewport by a screen-space drag delta
    pub fn pan(&mut self, delta: Point) {
        let origin = self.project(&self.center, None);
        let new_center = self.unproject(&origin.subtract(&delta), None);
        self.set_center(new_center);
    }

    /// Zooms while keeping the geographic point under `focus` fixed on screen
    pub fn zoom_around(&mut self, zoom: f64, focus: Point) {
        let anchor = self.pixel_to_lat_lng(&focus);
        self.set_zoom(zoom);

        let drift = self.lat_lng_to_pixel(&anchor).subtract(&focus);
        if drift.x != 0.0 || drift.y != 0.0 {
            self.pan(drift.multiply(-1.0));
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let (lat, lng) = crate::core::constants::DEFAULT_CENTER;
        Self::new(
            LatLng::new(lat, lng),
            crate::core::constants::DEFAULT_ZOOM,
            Point::new(800.0, 600.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_projects_to_screen_middle() {
        let viewport = Viewport::new(LatLng::new(30.0, 110.0), 3.0, Point::new(800.0, 600.0));
        let p = viewport.lat_lng_to_pixel(&LatLng::new(30.0, 110.0));
        assert!((p.x - 400.0).abs() < 1e-6);
        assert!((p.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_round_trip() {
        let viewport = Viewport::default();
        let coord = LatLng::new(39.9042, 116.4074);
        let screen = viewport.lat_lng_to_pixel(&coord);
        let back = viewport.pixel_to_lat_lng(&screen);
        assert!((back.lat - coord.lat).abs() < 1e-6);
        assert!((back.lng - coord.lng).abs() < 1e-6);
    }

    #[test]
    fn test_world_origin() {
        let viewport = Viewport::new(LatLng::default(), 0.0, Point::new(256.0, 256.0));
        let p = viewport.project(&LatLng::new(0.0, 0.0), None);
        assert!((p.x - 128.0).abs() < 1e-9);
        assert!((p.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut viewport = Viewport::default();
        let before = viewport.center;
        viewport.pan(Point::new(100.0, 0.0));
        // Dragging right reveals what is to the west
        assert!(viewport.center.lng < before.lng);
        assert!((viewport.center.lat - before.lat).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_around_keeps_focus_fixed() {
        let mut viewport = Viewport::default();
        let focus = Point::new(600.0, 200.0);
        let anchor = viewport.pixel_to_lat_lng(&focus);
        viewport.zoom_around(5.0, focus);
        assert_eq!(viewport.zoom, 5.0);
        let after = viewport.lat_lng_to_pixel(&anchor);
        assert!((after.x - focus.x).abs() < 1e-3);
        assert!((after.y - focus.y).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default().with_zoom_limits(1.0, 20.0);
        viewport.set_zoom(40.0);
        assert_eq!(viewport.zoom, 20.0);
        viewport.set_zoom(-3.0);
        assert_eq!(viewport.zoom, 1.0);
    }
}
