//! Country reference records: where to center the map and how far to zoom
//! when a country is picked by name.

use glam::DVec2;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Static facts about one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRecord {
    pub display_name: &'static str,
    pub code: &'static str,
    /// (longitude, latitude)
    pub center: DVec2,
    pub zoom: f64,
}

const fn record(display_name: &'static str, code: &'static str, lon: f64, lat: f64, zoom: f64) -> CountryRecord {
    CountryRecord {
        display_name,
        code,
        center: DVec2::new(lon, lat),
        zoom,
    }
}

const RECORDS: &[CountryRecord] = &[
    record("United States", "US", -98.6, 39.8, 2.5),
    record("Canada", "CA", -101.0, 57.0, 2.0),
    record("Mexico", "MX", -102.5, 23.6, 3.5),
    record("Brazil", "BR", -53.0, -10.5, 2.5),
    record("Argentina", "AR", -64.0, -35.0, 2.5),
    record("Chile", "CL", -71.0, -35.7, 2.5),
    record("Colombia", "CO", -74.3, 4.6, 4.0),
    record("Peru", "PE", -75.0, -9.2, 4.0),
    record("United Kingdom", "GB", -2.5, 54.0, 5.0),
    record("France", "FR", 2.2, 46.6, 5.0),
    record("Germany", "DE", 10.4, 51.2, 5.0),
    record("Spain", "ES", -3.7, 40.2, 5.0),
    record("Italy", "IT", 12.6, 42.8, 5.0),
    record("Poland", "PL", 19.1, 52.0, 5.0),
    record("Norway", "NO", 9.0, 64.5, 3.5),
    record("Sweden", "SE", 16.5, 62.5, 3.5),
    record("Finland", "FI", 26.0, 64.5, 4.0),
    record("Ukraine", "UA", 31.2, 48.4, 4.5),
    record("Russia", "RU", 100.0, 62.0, 1.5),
    record("Turkey", "TR", 35.2, 39.0, 4.5),
    record("Egypt", "EG", 30.8, 26.8, 4.5),
    record("Nigeria", "NG", 8.7, 9.1, 4.5),
    record("Democratic Republic of the Congo", "CD", 23.6, -2.9, 3.5),
    record("Kenya", "KE", 37.9, 0.2, 5.0),
    record("South Africa", "ZA", 24.7, -29.0, 4.0),
    record("Saudi Arabia", "SA", 45.1, 23.9, 4.0),
    record("Iran", "IR", 53.7, 32.4, 4.0),
    record("India", "IN", 79.0, 22.0, 3.0),
    record("Sri Lanka", "LK", 80.7, 7.9, 8.0),
    record("China", "CN", 104.2, 35.9, 2.5),
    record("Mongolia", "MN", 103.8, 46.9, 3.5),
    record("South Korea", "KR", 127.8, 36.5, 6.0),
    record("Japan", "JP", 138.3, 36.2, 4.0),
    record("Indonesia", "ID", 117.0, -2.5, 2.5),
    record("Australia", "AU", 134.0, -25.7, 2.5),
    record("New Zealand", "NZ", 172.5, -41.5, 4.0),
    record("Greenland", "GL", -42.0, 72.0, 2.0),
    record("Kazakhstan", "KZ", 67.0, 48.0, 3.0),
    record("Algeria", "DZ", 2.6, 28.0, 3.5),
    record("Madagascar", "MG", 46.9, -18.8, 5.0),
];

/// The table behind [`find`], materialised on first use.
static TABLE: LazyLock<&'static [CountryRecord]> = LazyLock::new(|| {
    debug!(records = RECORDS.len(), "country reference table loaded");
    RECORDS
});

/// All reference records in display order.
pub fn all() -> &'static [CountryRecord] {
    *TABLE
}

/// Find the record for a canonical display name.
pub fn find(display_name: &str) -> Option<&'static CountryRecord> {
    TABLE.iter().find(|r| r.display_name == display_name)
}

/// Outcome of polling a [`PendingRecord`].
#[derive(Debug, PartialEq)]
pub enum LoadState {
    Pending,
    /// The lookup finished; `None` when the name matched nothing.
    Ready(Option<CountryRecord>),
}

/// A reference lookup running off the UI thread.
pub struct PendingRecord {
    generation: u64,
    name: String,
    rx: Receiver<Option<CountryRecord>>,
}

impl PendingRecord {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> LoadState {
        match self.rx.try_recv() {
            Ok(record) => LoadState::Ready(record),
            Err(TryRecvError::Empty) => LoadState::Pending,
            // Worker dropped without answering
            Err(TryRecvError::Disconnected) => LoadState::Ready(None),
        }
    }

    /// Block until the lookup finishes.
    pub fn wait(self) -> Option<CountryRecord> {
        self.rx.recv().ok().flatten()
    }
}

/// Resolves reference records lazily on the rayon pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceLoader;

impl ReferenceLoader {
    /// Start looking up `name`. The caller tags the request with its own
    /// generation counter so late answers can be told apart from current ones.
    pub fn request(&self, name: &str, generation: u64) -> PendingRecord {
        let (tx, rx) = mpsc::channel();
        let owned = name.to_string();
        trace!(name = %owned, generation, "reference lookup queued");
        rayon::spawn(move || {
            let found = find(&owned).cloned();
            let _ = tx.send(found);
        });
        PendingRecord {
            generation,
            name: name.to_string(),
            rx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_country() {
        let us = find("United States").unwrap();
        assert_eq!(us.code, "US");
        assert!(us.zoom >= 1.0 && us.zoom <= 8.0);
    }

    #[test]
    fn find_is_exact() {
        assert!(find("united states").is_none());
        assert!(find("United States of America").is_none());
    }

    #[test]
    fn records_are_unique_and_in_bounds() {
        let mut names: Vec<_> = all().iter().map(|r| r.display_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), all().len());
        for r in all() {
            assert!((1.0..=8.0).contains(&r.zoom), "{} zoom {}", r.display_name, r.zoom);
            assert!((-180.0..=180.0).contains(&r.center.x));
            assert!((-85.0..=85.0).contains(&r.center.y));
        }
    }

    #[test]
    fn loader_resolves_off_thread() {
        let pending = ReferenceLoader.request("Japan", 7);
        assert_eq!(pending.generation(), 7);
        assert_eq!(pending.name(), "Japan");
        let record = pending.wait().unwrap();
        assert_eq!(record.display_name, "Japan");
    }

    #[test]
    fn loader_reports_unknown_as_none() {
        let pending = ReferenceLoader.request("Atlantis", 1);
        assert_eq!(pending.wait(), None);
    }
}
