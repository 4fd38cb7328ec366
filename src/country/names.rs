//! Dataset name standardisation.
//!
//! Boundary datasets use their own spellings for some countries (formal long
//! names, abbreviations). Everything the map compares or stores goes through
//! [`standardize`] first.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Dataset spelling -> canonical display name.
///
/// No canonical name may appear as a key, otherwise standardising twice would
/// not be a no-op.
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("United States of America", "United States"),
        ("Russian Federation", "Russia"),
        ("Dem. Rep. Congo", "Democratic Republic of the Congo"),
        ("Central African Rep.", "Central African Republic"),
        ("Dominican Rep.", "Dominican Republic"),
        ("Bosnia and Herz.", "Bosnia and Herzegovina"),
        ("Eq. Guinea", "Equatorial Guinea"),
        ("S. Sudan", "South Sudan"),
        ("Solomon Is.", "Solomon Islands"),
        ("Falkland Is.", "Falkland Islands"),
        ("W. Sahara", "Western Sahara"),
        ("Fr. S. Antarctic Lands", "French Southern and Antarctic Lands"),
        ("N. Cyprus", "Northern Cyprus"),
        ("Côte d'Ivoire", "Ivory Coast"),
        ("eSwatini", "Eswatini"),
        ("Republic of Korea", "South Korea"),
        ("Dem. Rep. Korea", "North Korea"),
        ("Lao PDR", "Laos"),
        ("Viet Nam", "Vietnam"),
    ])
});

/// Map a dataset country name to its canonical display name.
///
/// Names without an alias pass through unchanged.
pub fn standardize(name: &str) -> &str {
    match ALIASES.get(name) {
        Some(canonical) => canonical,
        None => name,
    }
}
