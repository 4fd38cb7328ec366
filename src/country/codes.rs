//! ISO 3166-1 alpha-2 lookup for initial countries given by code.

use std::collections::HashMap;
use std::sync::LazyLock;

/// ISO 3166-1 alpha-2 code -> canonical display name.
static COUNTRY_CODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("US", "United States"),
        ("CA", "Canada"),
        ("MX", "Mexico"),
        ("BR", "Brazil"),
        ("AR", "Argentina"),
        ("CL", "Chile"),
        ("CO", "Colombia"),
        ("PE", "Peru"),
        ("GB", "United Kingdom"),
        ("FR", "France"),
        ("DE", "Germany"),
        ("ES", "Spain"),
        ("IT", "Italy"),
        ("PL", "Poland"),
        ("NO", "Norway"),
        ("SE", "Sweden"),
        ("FI", "Finland"),
        ("UA", "Ukraine"),
        ("RU", "Russia"),
        ("TR", "Turkey"),
        ("EG", "Egypt"),
        ("NG", "Nigeria"),
        ("CD", "Democratic Republic of the Congo"),
        ("KE", "Kenya"),
        ("ZA", "South Africa"),
        ("SA", "Saudi Arabia"),
        ("IR", "Iran"),
        ("IN", "India"),
        ("LK", "Sri Lanka"),
        ("CN", "China"),
        ("MN", "Mongolia"),
        ("KR", "South Korea"),
        ("JP", "Japan"),
        ("ID", "Indonesia"),
        ("AU", "Australia"),
        ("NZ", "New Zealand"),
        ("GL", "Greenland"),
        ("KZ", "Kazakhstan"),
        ("DZ", "Algeria"),
        ("MG", "Madagascar"),
    ])
});

/// Look up a country display name by ISO 3166-1 alpha-2 code.
///
/// Case-insensitive: "us" and "US" both match. Unknown codes yield `None`.
pub fn name_for_code(code: &str) -> Option<&'static str> {
    COUNTRY_CODES.get(code.trim().to_uppercase().as_str()).copied()
}
