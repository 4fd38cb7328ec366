use crate::country::standardize;
use crate::data::{builtin_world, Dataset, Polygon, Region};
use crate::error::{MapError, Result};
use geojson::{Feature, GeoJson, Geometry, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Property keys tried, in order, for a feature's country name.
const NAME_KEYS: [&str; 4] = ["name", "NAME", "ADMIN", "name_long"];

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Where the boundary dataset should come from.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    /// Local GeoJSON file; also the cache target for downloads.
    pub file: PathBuf,
    /// Versioned remote GeoJSON.
    pub url: String,
    /// Download `url` when `file` is missing.
    pub fetch: bool,
}

/// Load the dataset from the first source that works: local file, remote
/// download (cached to the local file), then the built-in coarse world.
pub fn load_dataset(source: &DatasetSource) -> Dataset {
    if source.file.exists() {
        match load_geojson_file(&source.file) {
            Ok(ds) => return ds,
            Err(e) => warn!(error = %e, "falling back from local dataset"),
        }
    }

    if source.fetch {
        match fetch_geojson(&source.url).and_then(|text| {
            let ds = parse_geojson(&text, &source.url)?;
            cache_download(&source.file, &text);
            Ok(ds)
        }) {
            Ok(ds) => return ds,
            Err(e) => warn!(error = %e, "falling back from remote dataset"),
        }
    }

    info!("using built-in coarse world outline");
    builtin_world()
}

fn cache_download(path: &Path, text: &str) {
    let result = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(path, text));
    match result {
        Ok(()) => debug!(path = %path.display(), "cached downloaded dataset"),
        Err(source) => {
            let e = MapError::FileWrite {
                path: path.to_path_buf(),
                source,
            };
            warn!(error = %e, "could not cache dataset");
        }
    }
}

/// Load country polygons from a GeoJSON file
pub fn load_geojson_file(path: &Path) -> Result<Dataset> {
    let content = fs::read_to_string(path).map_err(|source| MapError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_geojson(&content, &path.display().to_string())
}

/// Download a GeoJSON document
pub fn fetch_geojson(url: &str) -> Result<String> {
    info!(url, "fetching country dataset");
    let wrap = |source: reqwest::Error| MapError::Fetch {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(wrap)?;
    client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(wrap)
}

/// Parse GeoJSON text into a dataset. Features without a name or without
/// polygon geometry are skipped.
pub fn parse_geojson(text: &str, origin: &str) -> Result<Dataset> {
    let geojson: GeoJson = text.parse().map_err(|e| MapError::GeoJson {
        origin: origin.to_string(),
        source: Box::new(e),
    })?;

    let features: Vec<Feature> = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => Vec::new(),
    };

    let regions: Vec<Region> = features.iter().filter_map(feature_region).collect();
    if regions.is_empty() {
        return Err(MapError::EmptyDataset {
            origin: origin.to_string(),
        });
    }

    info!(origin, regions = regions.len(), "loaded country dataset");
    Ok(Dataset::new(regions, origin))
}

fn feature_name(feature: &Feature) -> Option<&str> {
    let props = feature.properties.as_ref()?;
    NAME_KEYS
        .iter()
        .filter_map(|key| props.get(*key))
        .find_map(|v| v.as_str())
        .filter(|name| !name.is_empty())
}

fn feature_region(feature: &Feature) -> Option<Region> {
    let name = feature_name(feature)?;
    let mut polygons = Vec::new();
    collect_polygons(feature.geometry.as_ref()?, &mut polygons);
    if polygons.is_empty() {
        debug!(name, "skipping feature without polygons");
        return None;
    }
    Some(Region::new(standardize(name), polygons))
}

fn to_ring(coords: &[Vec<f64>]) -> Vec<(f64, f64)> {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

fn collect_polygons(geometry: &Geometry, out: &mut Vec<Polygon>) {
    match &geometry.value {
        Value::Polygon(rings) => {
            out.push(rings.iter().map(|r| to_ring(r)).collect());
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                out.push(rings.iter().map(|r| to_ring(r)).collect());
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}
