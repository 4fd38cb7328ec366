//! Country naming and reference data.

mod codes;
mod names;
pub mod reference;

pub use codes::name_for_code;
pub use names::standardize;
pub use reference::{CountryRecord, LoadState, PendingRecord, ReferenceLoader};

/// Resolve the country a widget should start on.
///
/// An explicit name wins over a code; an unknown code resolves to nothing.
pub fn resolve_initial(name: Option<&str>, code: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    match name {
        Some(n) => Some(standardize(n).to_string()),
        None => code.and_then(name_for_code).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_beats_code() {
        assert_eq!(resolve_initial(Some("Japan"), Some("US")).as_deref(), Some("Japan"));
    }

    #[test]
    fn code_used_without_name() {
        assert_eq!(resolve_initial(None, Some("US")).as_deref(), Some("United States"));
        assert_eq!(resolve_initial(Some("  "), Some("BR")).as_deref(), Some("Brazil"));
    }

    #[test]
    fn explicit_name_is_standardized() {
        assert_eq!(
            resolve_initial(Some("United States of America"), None).as_deref(),
            Some("United States")
        );
    }

    #[test]
    fn nothing_resolves_to_none() {
        assert_eq!(resolve_initial(None, None), None);
        assert_eq!(resolve_initial(None, Some("ZZ")), None);
    }
}
