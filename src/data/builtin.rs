use crate::country::standardize;
use crate::data::{Dataset, Region};

/// Coarse outlines, spelled the way boundary datasets spell them, so the
/// app still works offline. Good enough to pick a country, not to navigate by.
const OUTLINES: &[(&str, &[&[(f64, f64)]])] = &[
    (
        "United States of America",
        &[
            &[
                (-124.7, 48.4), (-123.0, 46.0), (-124.2, 42.0), (-120.6, 34.6), (-117.1, 32.5),
                (-111.0, 31.3), (-108.2, 31.3), (-106.5, 31.8), (-103.0, 29.0), (-99.5, 27.5),
                (-97.1, 25.9), (-97.4, 27.8), (-94.0, 29.7), (-89.6, 30.2), (-85.0, 29.7),
                (-82.7, 27.5), (-81.2, 25.2), (-80.1, 26.9), (-81.4, 30.7), (-76.0, 35.0),
                (-76.0, 38.0), (-74.0, 40.5), (-70.0, 41.5), (-70.7, 43.0), (-67.0, 44.8),
                (-69.2, 47.4), (-71.5, 45.0), (-75.0, 44.9), (-79.0, 43.3), (-83.0, 42.0),
                (-82.5, 45.3), (-88.0, 48.0), (-95.2, 49.0), (-123.0, 49.0), (-124.7, 48.4),
            ],
            &[
                (-141.0, 69.6), (-156.8, 71.3), (-166.5, 68.3), (-162.0, 66.0), (-166.0, 61.5),
                (-157.0, 58.7), (-162.0, 55.0), (-152.0, 57.9), (-149.0, 60.5), (-141.0, 60.0),
                (-141.0, 69.6),
            ],
        ],
    ),
    (
        "Canada",
        &[&[
            (-141.0, 69.6), (-141.0, 60.0), (-130.0, 55.5), (-123.0, 49.0), (-95.2, 49.0),
            (-88.0, 48.0), (-82.5, 45.3), (-83.0, 42.0), (-79.0, 43.3), (-75.0, 44.9),
            (-71.5, 45.0), (-69.2, 47.4), (-67.0, 44.8), (-64.0, 45.5), (-60.0, 46.0),
            (-53.0, 47.0), (-56.0, 52.0), (-61.0, 56.0), (-65.0, 60.3), (-71.0, 61.0),
            (-78.0, 62.5), (-77.0, 58.0), (-79.0, 54.0), (-82.0, 52.5), (-87.0, 56.0),
            (-94.0, 59.0), (-94.0, 61.5), (-87.5, 64.2), (-81.0, 68.0), (-95.0, 68.5),
            (-108.0, 68.5), (-120.0, 69.5), (-130.0, 70.0), (-141.0, 69.6),
        ]],
    ),
    (
        "Mexico",
        &[&[
            (-117.1, 32.5), (-111.0, 31.3), (-108.2, 31.3), (-106.5, 31.8), (-103.0, 29.0),
            (-99.5, 27.5), (-97.1, 25.9), (-97.7, 21.9), (-96.0, 19.0), (-94.5, 18.2),
            (-91.0, 18.8), (-90.4, 21.2), (-87.0, 21.5), (-87.6, 18.5), (-89.0, 17.8),
            (-91.4, 17.2), (-92.2, 14.6), (-95.0, 16.0), (-99.0, 16.6), (-105.5, 20.5),
            (-105.5, 23.2), (-109.4, 26.9), (-112.8, 31.5), (-117.1, 32.5),
        ]],
    ),
    (
        "Greenland",
        &[&[
            (-73.0, 78.4), (-60.0, 82.0), (-30.0, 83.5), (-20.0, 81.5), (-18.0, 76.0),
            (-22.0, 70.5), (-31.5, 68.0), (-40.0, 65.0), (-43.0, 60.0), (-48.0, 61.0),
            (-52.5, 65.0), (-54.0, 70.0), (-58.0, 75.5), (-66.0, 76.0), (-73.0, 78.4),
        ]],
    ),
    (
        "Brazil",
        &[&[
            (-60.0, 5.0), (-51.6, 4.2), (-50.0, 0.0), (-44.0, -2.5), (-35.0, -5.5),
            (-35.0, -9.0), (-39.0, -13.5), (-39.5, -18.0), (-41.0, -22.0), (-48.5, -25.8),
            (-53.4, -33.7), (-57.6, -30.2), (-53.6, -26.0), (-54.6, -25.5), (-58.0, -20.0),
            (-57.8, -16.0), (-60.3, -15.0), (-65.3, -10.9), (-70.0, -11.0), (-73.0, -9.0),
            (-73.9, -4.3), (-70.0, -4.0), (-69.4, 1.0), (-66.8, 1.2), (-63.5, 3.9),
            (-60.0, 5.0),
        ]],
    ),
    (
        "Argentina",
        &[&[
            (-54.6, -25.5), (-53.6, -26.0), (-57.6, -30.2), (-58.4, -33.9), (-57.5, -38.1),
            (-62.3, -38.8), (-65.0, -42.0), (-65.8, -45.0), (-67.6, -46.5), (-69.1, -50.3),
            (-68.3, -52.3), (-72.3, -51.5), (-71.9, -44.1), (-71.5, -36.0), (-70.0, -33.0),
            (-68.6, -27.5), (-67.1, -22.7), (-64.4, -22.0), (-62.8, -22.0), (-60.0, -24.0),
            (-57.7, -25.5), (-54.6, -25.5),
        ]],
    ),
    (
        "Chile",
        &[&[
            (-70.4, -18.3), (-69.1, -18.5), (-67.1, -22.7), (-68.6, -27.5), (-70.0, -33.0),
            (-71.5, -36.0), (-71.9, -44.1), (-72.3, -51.5), (-68.3, -52.3), (-74.5, -52.5),
            (-75.5, -46.0), (-73.5, -41.0), (-71.6, -30.0), (-70.4, -18.3),
        ]],
    ),
    (
        "Spain",
        &[&[
            (-9.0, 43.0), (-1.8, 43.4), (3.2, 42.4), (0.9, 41.0), (-0.3, 39.3),
            (0.2, 38.7), (-2.2, 36.7), (-5.4, 36.0), (-6.4, 36.8), (-7.4, 37.2),
            (-7.3, 38.4), (-7.0, 39.7), (-6.9, 41.9), (-8.9, 41.9), (-9.0, 43.0),
        ]],
    ),
    (
        "France",
        &[&[
            (-4.8, 48.4), (-1.6, 46.0), (-1.8, 43.4), (3.2, 42.4), (3.2, 43.3),
            (6.5, 43.1), (7.5, 43.8), (6.8, 46.0), (8.2, 48.9), (6.0, 49.5),
            (2.5, 51.1), (-1.5, 49.6), (-4.8, 48.4),
        ]],
    ),
    (
        "Germany",
        &[&[
            (6.0, 49.5), (8.2, 48.9), (7.6, 47.6), (10.2, 47.3), (13.0, 47.5),
            (13.8, 48.6), (12.1, 50.3), (15.0, 51.0), (14.6, 53.5), (14.2, 53.9),
            (11.0, 54.0), (9.9, 54.9), (8.6, 54.9), (8.5, 53.6), (7.0, 53.4),
            (6.0, 51.8), (6.0, 49.5),
        ]],
    ),
    (
        "Russian Federation",
        &[&[
            (28.0, 69.8), (33.0, 69.3), (41.0, 67.5), (44.0, 68.5), (53.0, 68.5),
            (60.0, 69.8), (68.0, 68.5), (73.0, 72.7), (80.0, 73.5), (87.0, 75.0),
            (100.0, 77.0), (113.0, 73.5), (130.0, 71.0), (140.0, 72.5), (150.0, 71.5),
            (160.0, 69.6), (170.0, 70.0), (179.9, 69.0), (179.9, 65.0), (177.0, 62.3),
            (170.0, 60.0), (164.0, 59.9), (162.0, 57.8), (163.0, 56.0), (157.0, 51.0),
            (156.0, 57.0), (150.0, 59.3), (143.0, 59.3), (135.0, 54.7), (140.5, 53.0),
            (141.2, 48.0), (135.0, 43.3), (131.0, 42.5), (131.0, 45.0), (134.0, 48.3),
            (127.5, 49.8), (120.0, 53.3), (117.0, 49.6), (108.0, 49.5), (98.0, 50.5),
            (88.0, 49.3), (87.0, 49.8), (80.0, 51.0), (76.0, 54.0), (70.0, 55.0),
            (61.0, 54.0), (61.0, 51.0), (55.0, 51.5), (48.0, 50.5), (47.5, 45.5),
            (46.0, 43.0), (48.0, 41.8), (43.5, 42.5), (40.0, 43.4), (38.0, 47.0),
            (40.0, 48.0), (40.0, 49.6), (35.5, 50.5), (34.0, 52.3), (31.8, 52.1),
            (31.5, 53.0), (27.6, 56.8), (28.0, 59.5), (30.0, 61.0), (29.5, 64.0),
            (30.0, 67.5), (28.0, 69.8),
        ]],
    ),
    (
        "Kazakhstan",
        &[&[
            (48.0, 50.5), (55.0, 51.5), (61.0, 51.0), (61.0, 54.0), (70.0, 55.0),
            (76.0, 54.0), (80.0, 51.0), (87.0, 49.8), (85.0, 47.0), (83.0, 47.2),
            (80.2, 45.0), (80.0, 42.5), (74.0, 43.0), (71.0, 42.3), (68.0, 40.7),
            (66.0, 42.0), (62.0, 43.5), (56.0, 45.3), (53.0, 42.0), (50.0, 44.5),
            (52.5, 45.3), (47.5, 45.5), (48.0, 50.5),
        ]],
    ),
    (
        "Mongolia",
        &[&[
            (87.8, 49.2), (92.0, 50.6), (98.0, 50.5), (108.0, 49.5), (117.0, 49.6),
            (119.8, 46.5), (116.0, 45.5), (111.5, 43.5), (105.0, 41.6), (96.5, 42.7),
            (91.0, 45.2), (87.8, 49.2),
        ]],
    ),
    (
        "China",
        &[&[
            (80.0, 42.5), (80.2, 45.0), (83.0, 47.2), (85.0, 47.0), (87.8, 49.2),
            (91.0, 45.2), (96.5, 42.7), (105.0, 41.6), (111.5, 43.5), (116.0, 45.5),
            (119.8, 46.5), (117.0, 49.6), (120.0, 53.3), (127.5, 49.8), (134.0, 48.3),
            (131.0, 45.0), (131.0, 42.5), (129.0, 42.4), (124.5, 40.0), (121.5, 39.5),
            (122.0, 40.7), (118.0, 39.2), (119.3, 37.2), (122.5, 37.0), (120.5, 34.0),
            (122.0, 30.5), (120.0, 26.0), (116.5, 23.0), (110.5, 20.5), (108.0, 21.6),
            (106.7, 22.8), (101.8, 21.2), (98.0, 24.0), (97.5, 28.0), (92.0, 27.8),
            (88.8, 28.0), (86.0, 27.9), (81.0, 30.0), (78.9, 32.6), (78.0, 35.5),
            (75.0, 37.0), (73.5, 39.5), (76.0, 40.5), (80.0, 42.5),
        ]],
    ),
    (
        "India",
        &[&[
            (68.2, 23.7), (70.0, 20.7), (72.8, 19.0), (74.0, 15.0), (76.5, 9.0),
            (77.5, 8.0), (80.0, 10.3), (80.3, 13.5), (82.3, 16.6), (87.0, 21.5),
            (89.0, 21.8), (89.0, 26.0), (92.0, 25.0), (92.5, 22.0), (94.0, 24.0),
            (97.0, 27.5), (92.0, 27.8), (88.8, 28.0), (86.0, 27.9), (81.0, 30.0),
            (78.9, 32.6), (78.0, 35.5), (74.5, 35.0), (74.5, 32.0), (71.0, 28.0),
            (70.0, 25.0), (68.2, 23.7),
        ]],
    ),
    (
        "Sri Lanka",
        &[&[
            (79.8, 9.8), (80.8, 9.3), (81.5, 7.5), (81.8, 7.0), (81.2, 6.2),
            (80.2, 5.95), (79.9, 6.8), (79.8, 8.1), (79.8, 9.8),
        ]],
    ),
    (
        "Japan",
        &[
            &[
                (130.9, 34.0), (132.5, 35.4), (135.9, 35.7), (137.3, 36.8), (139.2, 38.0),
                (140.0, 39.9), (140.0, 41.3), (141.5, 41.3), (142.0, 39.5), (141.0, 38.3),
                (140.9, 36.9), (140.8, 35.6), (139.8, 34.9), (138.8, 34.6), (136.8, 34.3),
                (135.1, 33.8), (133.0, 34.3), (130.9, 34.0),
            ],
            &[
                (139.9, 42.6), (141.2, 41.7), (143.2, 41.9), (145.5, 43.3), (144.3, 44.0),
                (141.9, 45.5), (141.5, 43.5), (139.9, 42.6),
            ],
            &[
                (129.8, 33.2), (130.9, 33.9), (131.9, 33.2), (131.3, 31.4), (130.2, 31.2),
                (129.8, 33.2),
            ],
            &[(132.6, 33.4), (134.2, 34.2), (134.7, 33.8), (133.0, 32.8), (132.6, 33.4)],
        ],
    ),
    (
        "South Africa",
        &[&[
            (16.5, -28.6), (20.0, -24.8), (20.0, -22.0), (25.3, -25.8), (26.8, -24.2),
            (29.4, -22.1), (31.1, -22.3), (32.0, -26.8), (32.9, -26.2), (32.5, -28.6),
            (30.1, -31.3), (27.5, -33.2), (25.0, -34.0), (22.6, -34.0), (20.0, -34.8),
            (18.2, -33.9), (18.3, -32.0), (16.5, -28.6),
        ]],
    ),
    (
        "Madagascar",
        &[&[
            (49.3, -12.0), (50.5, -15.5), (49.5, -17.5), (47.0, -25.0), (45.0, -25.5),
            (43.5, -22.0), (44.3, -16.2), (47.0, -15.0), (49.3, -12.0),
        ]],
    ),
    (
        "Australia",
        &[&[
            (114.0, -22.0), (114.2, -26.3), (115.0, -34.3), (118.0, -35.0), (123.6, -33.9),
            (129.0, -31.7), (134.3, -32.6), (137.7, -35.5), (140.0, -37.9), (146.3, -39.1),
            (150.0, -37.4), (153.6, -28.1), (153.0, -25.2), (146.4, -19.0), (145.4, -14.9),
            (142.5, -10.7), (141.6, -12.9), (141.6, -15.0), (139.6, -17.6), (136.0, -15.5),
            (135.9, -12.0), (132.6, -11.3), (130.0, -13.0), (129.6, -14.9), (126.0, -14.0),
            (122.3, -17.0), (121.0, -19.5), (117.0, -20.6), (114.0, -22.0),
        ]],
    ),
];

/// Generate a coarse country dataset for when no data file is available
pub fn builtin_world() -> Dataset {
    let regions = OUTLINES
        .iter()
        .map(|(name, parts)| {
            // Each part is a single-ring polygon
            let polygons = parts.iter().map(|ring| vec![ring.to_vec()]).collect();
            Region::new(standardize(name), polygons)
        })
        .collect();
    Dataset::new(regions, "built-in")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::reference;

    #[test]
    fn builtin_names_are_standardized() {
        let ds = builtin_world();
        assert!(ds.index_of("United States").is_some());
        assert!(ds.index_of("Russia").is_some());
        assert!(ds.index_of("United States of America").is_none());
    }

    #[test]
    fn builtin_regions_have_reference_records() {
        for region in builtin_world().regions() {
            assert!(reference::find(&region.name).is_some(), "{}", region.name);
        }
    }

    #[test]
    fn reference_centers_hit_their_own_region() {
        let ds = builtin_world();
        for name in ["Brazil", "Russia", "South Africa", "Sri Lanka", "United States"] {
            let record = reference::find(name).unwrap();
            let hit = ds.hit_test(record.center.x, record.center.y).and_then(|i| ds.region(i));
            assert_eq!(hit.map(|r| r.name.as_str()), Some(name));
        }
    }

    #[test]
    fn rings_are_closed() {
        for region in builtin_world().regions() {
            for ring in region.polygons.iter().flatten() {
                assert_eq!(ring.first(), ring.last(), "{}", region.name);
            }
        }
    }
}
