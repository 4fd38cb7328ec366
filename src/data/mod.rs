//! Country boundary dataset: the shapes the map draws and hit-tests.

mod builtin;
mod loader;

pub use builtin::builtin_world;
pub use loader::{fetch_geojson, load_dataset, load_geojson_file, parse_geojson, DatasetSource};

use crate::map::{ring_contains, BBoxGrid};
use glam::DVec2;
use std::collections::HashSet;
use std::sync::Arc;

/// A geographic ring (closed sequence of lon/lat coordinates)
pub type Ring = Vec<(f64, f64)>;

/// Rings of one polygon: exterior first, then holes
pub type Polygon = Vec<Ring>;

/// Standardized names of every region a dataset can draw, shared between maps
pub type RegionNames = Arc<HashSet<String>>;

const GRID_CELL_DEGREES: f64 = 10.0;

/// One country shape from the dataset.
#[derive(Debug, Clone)]
pub struct Region {
    /// Standardized display name
    pub name: String,
    pub polygons: Vec<Polygon>,
    pub min: DVec2,
    pub max: DVec2,
}

impl Region {
    /// Build a region, computing its bounding box. `name` must already be
    /// standardized.
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for &(lon, lat) in polygons.iter().flatten().flatten() {
            min = min.min(DVec2::new(lon, lat));
            max = max.max(DVec2::new(lon, lat));
        }
        Self {
            name: name.into(),
            polygons,
            min,
            max,
        }
    }

    /// Even-odd containment over each polygon's rings.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lon < self.min.x || lon > self.max.x || lat < self.min.y || lat > self.max.y {
            return false;
        }
        self.polygons.iter().any(|rings| {
            rings
                .iter()
                .filter(|ring| ring_contains(ring, lon, lat))
                .count()
                % 2
                == 1
        })
    }
}

/// Ordered set of regions plus a lookup grid for hit testing.
pub struct Dataset {
    regions: Vec<Region>,
    names: RegionNames,
    grid: BBoxGrid,
    origin: String,
}

impl Dataset {
    pub fn new(regions: Vec<Region>, origin: impl Into<String>) -> Self {
        let grid = BBoxGrid::build(regions.iter().map(|r| (r.min, r.max)), GRID_CELL_DEGREES);
        let names = Arc::new(regions.iter().map(|r| r.name.clone()).collect());
        Self {
            regions,
            names,
            grid,
            origin: origin.into(),
        }
    }

    /// Where the data came from (file path, URL, or "built-in")
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Names a selection may take. Cheap to clone.
    pub fn names(&self) -> RegionNames {
        Arc::clone(&self.names)
    }

    pub fn region(&self, idx: usize) -> Option<&Region> {
        self.regions.get(idx)
    }

    /// Index of the region with this standardized name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.name == name)
    }

    /// Region under a geographic point. When shapes overlap the one drawn
    /// last (highest index) wins, matching paint order.
    pub fn hit_test(&self, lon: f64, lat: f64) -> Option<usize> {
        self.grid
            .query_point(lon, lat)
            .iter()
            .rev()
            .copied()
            .find(|&idx| self.regions[idx].contains(lon, lat))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two adjacent unit squares for deterministic tests.
    pub(crate) fn two_squares() -> Dataset {
        let square = |x0: f64, y0: f64, size: f64| -> Polygon {
            vec![vec![
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
                (x0, y0),
            ]]
        };
        Dataset::new(
            vec![
                Region::new("Westland", vec![square(-40.0, -20.0, 40.0)]),
                Region::new("Eastland", vec![square(0.0, -20.0, 40.0)]),
            ],
            "test",
        )
    }

    #[test]
    fn region_bbox_covers_all_points() {
        let ds = two_squares();
        let west = ds.region(0).unwrap();
        assert_eq!(west.min, DVec2::new(-40.0, -20.0));
        assert_eq!(west.max, DVec2::new(0.0, 20.0));
    }

    #[test]
    fn hit_test_picks_containing_region() {
        let ds = two_squares();
        assert_eq!(ds.hit_test(-10.0, 0.0), Some(0));
        assert_eq!(ds.hit_test(10.0, 0.0), Some(1));
        assert_eq!(ds.hit_test(100.0, 0.0), None);
    }

    #[test]
    fn holes_are_excluded() {
        let region = Region::new(
            "Ring",
            vec![vec![
                vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
                vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0), (4.0, 4.0)],
            ]],
        );
        assert!(region.contains(2.0, 2.0));
        assert!(!region.contains(5.0, 5.0));
    }

    #[test]
    fn index_of_uses_exact_name() {
        let ds = two_squares();
        assert_eq!(ds.index_of("Eastland"), Some(1));
        assert_eq!(ds.index_of("eastland"), None);
    }

    #[test]
    fn names_match_regions() {
        let ds = two_squares();
        let names = ds.names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("Westland") && names.contains("Eastland"));
    }
}
