//! Page routes in URL form, e.g. `/?country=Sri%20Lanka` or `/examples`.

use crate::error::{MapError, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The main map page, optionally landing on a country.
    Root { country: Option<String> },
    /// The example gallery.
    Examples,
}

impl Default for Route {
    fn default() -> Self {
        Route::Root { country: None }
    }
}

impl Route {
    pub fn root_with(country: impl Into<String>) -> Self {
        Route::Root {
            country: Some(country.into()),
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Root { country: None } => "/".to_string(),
            Route::Root {
                country: Some(country),
            } => format!("/?country={}", utf8_percent_encode(country, COMPONENT)),
            Route::Examples => "/examples".to_string(),
        }
    }

    /// Parse a path with optional query string. Unknown query keys are
    /// ignored; unknown paths are an error.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        match path.trim_end_matches('/') {
            "" => Ok(Route::Root {
                country: query.and_then(|q| query_param(q, "country")).filter(|c| !c.is_empty()),
            }),
            "/examples" | "examples" => Ok(Route::Examples),
            other => Err(MapError::Route(other.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        (k == key).then(|| decode(v))
    })
}

fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_is_percent_encoded() {
        assert_eq!(Route::root_with("Sri Lanka").to_path(), "/?country=Sri%20Lanka");
        assert_eq!(
            Route::root_with("Côte d'Ivoire").to_path(),
            "/?country=C%C3%B4te%20d'Ivoire"
        );
    }

    #[test]
    fn parses_root_and_examples() {
        assert_eq!(Route::parse("/").unwrap(), Route::default());
        assert_eq!(Route::parse("").unwrap(), Route::default());
        assert_eq!(Route::parse("/examples").unwrap(), Route::Examples);
        assert_eq!(Route::parse("/examples/").unwrap(), Route::Examples);
    }

    #[test]
    fn parses_country_query() {
        assert_eq!(
            Route::parse("/?country=South%20Africa").unwrap(),
            Route::root_with("South Africa")
        );
        assert_eq!(Route::parse("/?country=Sri+Lanka&x=1").unwrap(), Route::root_with("Sri Lanka"));
        assert_eq!(Route::parse("/?other=1").unwrap(), Route::default());
        assert_eq!(Route::parse("/?country=").unwrap(), Route::default());
    }

    #[test]
    fn path_survives_parse() {
        for route in [Route::default(), Route::Examples, Route::root_with("Côte d'Ivoire")] {
            assert_eq!(Route::parse(&route.to_path()).unwrap(), route);
        }
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert!(matches!(Route::parse("/nowhere"), Err(MapError::Route(p)) if p == "/nowhere"));
    }
}
