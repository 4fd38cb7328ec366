use crate::map::canvas::BrailleCanvas;

/// A ring already projected to canvas pixels.
pub type PixelRing = Vec<(i32, i32)>;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Outline a closed ring. Segments longer than `max_jump` pixels are skipped;
/// they come from rings crossing the antimeridian.
pub fn draw_ring(canvas: &mut BrailleCanvas, ring: &[(i32, i32)], max_jump: i32) {
    for seg in ring.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        if (a.0 - b.0).abs() > max_jump {
            continue;
        }
        draw_line(canvas, a.0, a.1, b.0, b.1);
    }
}

/// Scanline-fill a polygon given as rings (exterior first, holes after)
/// with the even-odd rule.
pub fn fill_polygon(canvas: &mut BrailleCanvas, rings: &[PixelRing], max_jump: i32) {
    let pixel_height = (canvas.height() * 4) as i32;
    let (mut min_y, mut max_y) = (i32::MAX, i32::MIN);
    for ring in rings {
        for &(_, y) in ring {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }
    if min_y > max_y {
        return;
    }
    let min_y = min_y.max(0);
    let max_y = max_y.min(pixel_height - 1);

    let mut crossings: Vec<i32> = Vec::new();
    for y in min_y..=max_y {
        crossings.clear();
        // Sample at the pixel center to avoid double-counting vertices
        let sy = y as f64 + 0.5;
        for ring in rings {
            for seg in ring.windows(2) {
                let (a, b) = (seg[0], seg[1]);
                if (a.0 - b.0).abs() > max_jump {
                    continue;
                }
                let (ay, by) = (a.1 as f64, b.1 as f64);
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    let t = (sy - ay) / (by - ay);
                    let x = a.0 as f64 + t * (b.0 - a.0) as f64;
                    crossings.push(x.round() as i32);
                }
            }
        }
        crossings.sort_unstable();
        for pair in crossings.chunks_exact(2) {
            canvas.fill_span(y, pair[0], pair[1]);
        }
    }
}

/// Even-odd point-in-ring test in geographic coordinates.
pub fn ring_contains(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > lat) != (yj > lat) && lon < (xj - xi) * (lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        for col in 0..5 {
            assert_eq!(canvas.cell(col, 0), 0x09);
        }
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.cell(0, 0), 0x47);
        assert_eq!(canvas.cell(0, 1), 0x47);
    }

    #[test]
    fn fill_square() {
        let mut canvas = BrailleCanvas::new(4, 2);
        let square = vec![(0, 0), (8, 0), (8, 8), (0, 8), (0, 0)];
        fill_polygon(&mut canvas, &[square], 100);
        // Every cell fully covered
        for row in 0..2 {
            for col in 0..4 {
                assert_eq!(canvas.cell(col, row), 0xFF, "cell {col},{row}");
            }
        }
    }

    #[test]
    fn fill_respects_holes() {
        let mut canvas = BrailleCanvas::new(8, 4);
        let outer = vec![(0, 0), (16, 0), (16, 16), (0, 16), (0, 0)];
        let hole = vec![(4, 4), (12, 4), (12, 12), (4, 12), (4, 4)];
        fill_polygon(&mut canvas, &[outer, hole], 100);
        // Cell covering pixels (6..8, 8..12) sits inside the hole
        assert_eq!(canvas.cell(3, 2), 0);
        assert_ne!(canvas.cell(0, 0), 0);
    }

    #[test]
    fn long_jumps_are_not_drawn() {
        let mut canvas = BrailleCanvas::new(10, 1);
        draw_ring(&mut canvas, &[(0, 0), (19, 0)], 5);
        assert!(canvas.is_blank());
    }

    #[test]
    fn point_in_ring() {
        let ring = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
        assert!(ring_contains(&ring, 5.0, 5.0));
        assert!(!ring_contains(&ring, 15.0, 5.0));
        assert!(!ring_contains(&ring[..2], 5.0, 5.0));
    }
}
