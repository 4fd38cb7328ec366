mod canvas;
mod grid;
mod projection;
mod raster;

pub use canvas::BrailleCanvas;
pub use grid::BBoxGrid;
pub use projection::{clamp_zoom, normalize_center, Viewport, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use raster::{draw_ring, fill_polygon, ring_contains, PixelRing};
