use glam::DVec2;
use std::collections::HashMap;

/// Spatial index over region bounding boxes.
/// Each region's bbox is indexed into every cell it overlaps, so a point query
/// never misses a region; false positives are removed by the exact
/// point-in-polygon test afterwards.
pub struct BBoxGrid {
    cells: HashMap<(i32, i32), Vec<usize>>,
    cell_size: f64,
}

impl BBoxGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[inline(always)]
    fn to_cell(&self, lon: f64, lat: f64) -> (i32, i32) {
        let x = (lon / self.cell_size).floor() as i32;
        let y = (lat / self.cell_size).floor() as i32;
        (x, y)
    }

    /// Build from (min, max) bounding boxes; the index of each box is its
    /// position in the iterator.
    pub fn build(bboxes: impl Iterator<Item = (DVec2, DVec2)>, cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, (min, max)) in bboxes.enumerate() {
            let min_cell = grid.to_cell(min.x, min.y);
            let max_cell = grid.to_cell(max.x, max.y);
            for y in min_cell.1..=max_cell.1 {
                for x in min_cell.0..=max_cell.0 {
                    grid.cells.entry((x, y)).or_default().push(idx);
                }
            }
        }
        grid
    }

    /// Indices of boxes whose cells contain the point, in insertion order.
    pub fn query_point(&self, lon: f64, lat: f64) -> &[usize] {
        self.cells
            .get(&self.to_cell(lon, lat))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
