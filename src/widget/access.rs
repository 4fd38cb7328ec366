//! State access strategies for [`super::WorldMap`].
//!
//! The widget only talks to [`ViewAccess`]. [`LocalView`] keeps a private
//! state per widget; [`ConnectedView`] forwards to a shared store. The choice
//! is made once, when the widget is built.

use crate::country::{CountryRecord, LoadState, PendingRecord, ReferenceLoader};
use crate::data::RegionNames;
use crate::store::{StoreHandle, WriteOutcome};
use crate::view::{apply_intent, Intent, MapViewState};
use tracing::{debug, trace};

pub trait ViewAccess {
    /// Current state for rendering and event handling.
    fn view(&self) -> MapViewState;

    /// Changes whenever the state behind this adapter changes.
    fn revision(&self) -> u64;

    /// Point the map at a resolved initial country.
    fn initialize(&mut self, name: &str);

    /// Apply a change requested by an event handler.
    fn apply(&mut self, intent: Intent);

    /// Drive deferred work. Returns true when state changed.
    fn poll(&mut self) -> bool {
        false
    }

    /// Block until deferred work has finished, then apply it.
    fn settle(&mut self) {}

    fn is_standalone(&self) -> bool;
}

/// Private per-widget state. Initial countries resolve through the lazy
/// reference loader and only apply when the dataset can draw them.
pub struct LocalView {
    state: MapViewState,
    revision: u64,
    drawable: RegionNames,
    loader: ReferenceLoader,
    pending: Option<PendingRecord>,
    generation: u64,
}

impl LocalView {
    pub fn new(show_unselected: bool, drawable: RegionNames) -> Self {
        Self {
            state: MapViewState::with_show_unselected(show_unselected),
            revision: 0,
            drawable,
            loader: ReferenceLoader,
            pending: None,
            generation: 0,
        }
    }

    fn replace(&mut self, next: MapViewState) {
        if next != self.state {
            self.state = next;
            self.revision += 1;
        }
    }

    fn finish(&mut self, generation: u64, name: &str, record: Option<CountryRecord>) {
        if generation != self.generation {
            // A newer initialisation superseded this one
            debug!(name, generation, current = self.generation, "dropping stale reference lookup");
            return;
        }
        match record {
            Some(record) if !self.drawable.contains(record.display_name) => {
                trace!(name, "initial country is not in the dataset; state unchanged");
            }
            Some(record) => {
                let moved = apply_intent(
                    &self.state,
                    &Intent::Move {
                        center: record.center,
                        zoom: record.zoom,
                    },
                );
                let selected = apply_intent(&moved, &Intent::Select(record.display_name.to_string()));
                self.replace(selected);
                debug!(name, "applied initial country");
            }
            None => trace!(name, "initial country has no reference record; state unchanged"),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl ViewAccess for LocalView {
    fn view(&self) -> MapViewState {
        self.state.clone()
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn initialize(&mut self, name: &str) {
        self.generation += 1;
        self.pending = Some(self.loader.request(name, self.generation));
    }

    fn apply(&mut self, intent: Intent) {
        let next = apply_intent(&self.state, &intent);
        self.replace(next);
    }

    fn poll(&mut self) -> bool {
        let Some(pending) = self.pending.as_ref() else {
            return false;
        };
        match pending.poll() {
            LoadState::Pending => false,
            LoadState::Ready(record) => {
                let before = self.revision;
                if let Some(pending) = self.pending.take() {
                    let name = pending.name().to_string();
                    self.finish(pending.generation(), &name, record);
                }
                self.revision != before
            }
        }
    }

    fn settle(&mut self) {
        if let Some(pending) = self.pending.take() {
            let generation = pending.generation();
            let name = pending.name().to_string();
            let record = pending.wait();
            self.finish(generation, &name, record);
        }
    }

    fn is_standalone(&self) -> bool {
        true
    }
}

/// Forwards every read and write to a shared store. Writes the store does not
/// support are skipped.
pub struct ConnectedView {
    store: StoreHandle,
}

impl ConnectedView {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    fn report(op: &str, outcome: WriteOutcome) {
        if outcome != WriteOutcome::Applied {
            trace!(op, ?outcome, "store write skipped");
        }
    }
}

impl ViewAccess for ConnectedView {
    fn view(&self) -> MapViewState {
        self.store.snapshot()
    }

    fn revision(&self) -> u64 {
        self.store.revision()
    }

    fn initialize(&mut self, name: &str) {
        Self::report("select_country_by_name", self.store.select_country_by_name(name));
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Select(name) => {
                Self::report("select_country_by_name", self.store.select_country_by_name(&name));
            }
            Intent::Move { center, zoom } => {
                Self::report("set_center", self.store.set_center(center));
                Self::report("set_zoom", self.store.set_zoom(zoom));
            }
            Intent::ShowUnselected(show) => {
                Self::report("set_show_unselected", self.store.set_show_unselected(show));
            }
        }
    }

    fn is_standalone(&self) -> bool {
        false
    }
}
