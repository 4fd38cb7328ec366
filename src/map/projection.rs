use glam::DVec2;
use std::f64::consts::PI;

/// Zoom bounds enforced on every viewport change.
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 8.0;

/// Multiplicative step for one zoom notch (scroll tick or key press).
pub const ZOOM_STEP: f64 = 1.5;

const MAX_LAT: f64 = 85.0;

/// Clamp a zoom level into [`MIN_ZOOM`, `MAX_ZOOM`]. NaN falls back to the minimum.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        MIN_ZOOM
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Wrap longitude into [-180, 180] and clamp latitude to the Mercator limit.
pub fn normalize_center(center: DVec2) -> DVec2 {
    let mut lon = center.x;
    if lon > 180.0 || lon < -180.0 {
        lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    }
    DVec2::new(lon, center.y.clamp(-MAX_LAT, MAX_LAT))
}

/// Viewport representing the visible map area and zoom level
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center (longitude, latitude)
    pub center: DVec2,
    /// Zoom level, 1 shows the whole world across the canvas width
    pub zoom: f64,
    /// Canvas pixel width
    pub width: usize,
    /// Canvas pixel height
    pub height: usize,
}

impl Viewport {
    pub fn new(center: DVec2, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center: normalize_center(center),
            zoom: clamp_zoom(zoom),
            width,
            height,
        }
    }

    /// Create a world view (shows entire world)
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(DVec2::ZERO, MIN_ZOOM, width, height)
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let cx = (self.width / 2) as i32;
        let cy = (self.height / 2) as i32;
        let (lon, lat) = self.unproject(cx + dx, cy + dy);
        self.center = normalize_center(DVec2::new(lon, lat));
    }

    /// Zoom in towards a specific pixel location
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, ZOOM_STEP);
    }

    /// Zoom out from a specific pixel location
    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / ZOOM_STEP);
    }

    /// Zoom by factor towards a specific pixel location
    pub fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        // Geographic point under the pointer stays put
        let (lon, lat) = self.unproject(px, py);
        self.zoom = clamp_zoom(self.zoom * factor);
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    fn center_mercator(&self) -> (f64, f64) {
        mercator(self.center.x, self.center.y)
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width as f64
    }

    /// Unproject pixel coordinates back to geographic coordinates (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.scale();
        if scale <= 0.0 {
            return (self.center.x, self.center.y);
        }
        let (center_x, center_y) = self.center_mercator();

        let x = (px as f64 - self.width as f64 / 2.0) / scale + center_x;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + center_y;

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();

        (lon, lat)
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = mercator(lon, lat);
        let (center_x, center_y) = self.center_mercator();
        let scale = self.scale();

        let px = ((x - center_x) * scale + self.width as f64 / 2.0).floor() as i32;
        let py = ((y - center_y) * scale + self.height as f64 / 2.0).floor() as i32;

        (px, py)
    }

    /// Check if a lon/lat bounding box might intersect the visible area
    pub fn bbox_might_be_visible(&self, min: DVec2, max: DVec2) -> bool {
        let (x0, y1) = self.project(min.x, min.y);
        let (x1, y0) = self.project(max.x, max.y);
        x1 >= 0 && x0 < self.width as i32 && y1 >= 0 && y0 < self.height as i32
    }
}

/// Web Mercator normalised to [0, 1] on both axes.
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0;
    let lat_rad = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        assert_eq!(clamp_zoom(0.2), MIN_ZOOM);
        assert_eq!(clamp_zoom(100.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(3.0), 3.0);
        assert_eq!(clamp_zoom(f64::NAN), MIN_ZOOM);

        let mut vp = Viewport::world(200, 100);
        for _ in 0..20 {
            vp.zoom_in_at(100, 50);
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..20 {
            vp.zoom_out_at(100, 50);
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn center_projects_to_middle() {
        let vp = Viewport::new(DVec2::new(139.0, 35.0), 4.0, 200, 100);
        assert_eq!(vp.project(139.0, 35.0), (100, 50));
    }

    #[test]
    fn project_unproject_agree() {
        let vp = Viewport::new(DVec2::new(10.0, 20.0), 2.0, 400, 200);
        let (px, py) = vp.project(30.0, 40.0);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - 30.0).abs() < 1.0);
        assert!((lat - 40.0).abs() < 1.0);
    }

    #[test]
    fn pan_moves_center_east() {
        let mut vp = Viewport::world(360, 180);
        vp.pan(36, 0);
        assert!(vp.center.x > 30.0 && vp.center.x < 40.0);
        assert!(vp.center.y.abs() < 1e-6);
    }

    #[test]
    fn center_wraps_and_clamps() {
        let c = normalize_center(DVec2::new(190.0, 89.0));
        assert!((c.x + 170.0).abs() < 1e-9);
        assert_eq!(c.y, 85.0);
    }

    #[test]
    fn zoom_at_keeps_point_under_cursor() {
        let mut vp = Viewport::world(400, 200);
        let before = vp.unproject(300, 60);
        vp.zoom_in_at(300, 60);
        let (px, py) = vp.project(before.0, before.1);
        assert!((px - 300).abs() <= 2);
        assert!((py - 60).abs() <= 2);
    }
}
