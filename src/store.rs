//! Shared map store for connected widgets.
//!
//! Every connected widget and sibling panel reads the same state through a
//! [`StoreHandle`]. Writes are dispatched as whole-state replacements, so a
//! reader never observes half an update.

use crate::country::{reference, standardize};
use crate::view::{apply_intent, Coord, Intent, MapViewState};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};

/// Result of a store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The store does not offer this operation; nothing changed.
    Unsupported,
    /// The operation exists but the argument matched nothing.
    Ignored,
}

/// What a connected widget needs from an external store.
///
/// Reads are required. Every write is optional: the defaults report
/// [`WriteOutcome::Unsupported`] and change nothing.
pub trait MapStore {
    /// Current state, read atomically.
    fn snapshot(&self) -> MapViewState;

    /// Bumped on every applied write. Stores that never change may keep 0.
    fn revision(&self) -> u64 {
        0
    }

    fn select_country_by_name(&self, _name: &str) -> WriteOutcome {
        WriteOutcome::Unsupported
    }

    fn set_center(&self, _center: Coord) -> WriteOutcome {
        WriteOutcome::Unsupported
    }

    fn set_zoom(&self, _zoom: f64) -> WriteOutcome {
        WriteOutcome::Unsupported
    }

    fn set_show_unselected(&self, _show: bool) -> WriteOutcome {
        WriteOutcome::Unsupported
    }
}

/// Shared, reference-counted store handle.
pub type StoreHandle = Rc<dyn MapStore>;

/// Discrete state-replacement actions.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    SelectByName(String),
    SetCenter(Coord),
    SetZoom(f64),
    SetShowUnselected(bool),
}

/// Compute the state after `action`, or `None` when the action changes
/// nothing. `known` is the set of region names the map can draw; a selection
/// outside it is ignored even when a reference record exists.
pub fn reduce(
    state: &MapViewState,
    action: &StoreAction,
    known: &HashSet<String>,
) -> Option<MapViewState> {
    let next = match action {
        StoreAction::SelectByName(raw) => {
            let name = standardize(raw.trim());
            if !known.contains(name) {
                return None;
            }
            match reference::find(name) {
                Some(record) => {
                    let moved = apply_intent(
                        state,
                        &Intent::Move {
                            center: record.center,
                            zoom: record.zoom,
                        },
                    );
                    apply_intent(&moved, &Intent::Select(name.to_string()))
                }
                // No camera preset: select in place
                None => apply_intent(state, &Intent::Select(name.to_string())),
            }
        }
        StoreAction::SetCenter(center) => apply_intent(
            state,
            &Intent::Move {
                center: *center,
                zoom: state.zoom,
            },
        ),
        StoreAction::SetZoom(zoom) => apply_intent(
            state,
            &Intent::Move {
                center: state.center,
                zoom: *zoom,
            },
        ),
        StoreAction::SetShowUnselected(show) => apply_intent(state, &Intent::ShowUnselected(*show)),
    };
    Some(next)
}

struct StoreState {
    view: MapViewState,
    revision: u64,
}

/// The application's shared store.
pub struct SharedMapStore {
    state: RefCell<StoreState>,
    known: HashSet<String>,
}

impl SharedMapStore {
    /// Create a store whose selectable names are `known` (usually the
    /// dataset's region names).
    pub fn new(initial: MapViewState, known: impl IntoIterator<Item = String>) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(StoreState {
                view: initial,
                revision: 0,
            }),
            known: known.into_iter().collect(),
        })
    }

    /// Apply one action as an atomic replacement of the whole state.
    pub fn dispatch(&self, action: StoreAction) -> WriteOutcome {
        let current = self.state.borrow().view.clone();
        match reduce(&current, &action, &self.known) {
            Some(next) => {
                let mut state = self.state.borrow_mut();
                state.view = next;
                state.revision += 1;
                debug!(?action, revision = state.revision, "store updated");
                WriteOutcome::Applied
            }
            None => {
                trace!(?action, "store action ignored");
                WriteOutcome::Ignored
            }
        }
    }
}

impl MapStore for SharedMapStore {
    fn snapshot(&self) -> MapViewState {
        self.state.borrow().view.clone()
    }

    fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    fn select_country_by_name(&self, name: &str) -> WriteOutcome {
        self.dispatch(StoreAction::SelectByName(name.to_string()))
    }

    fn set_center(&self, center: Coord) -> WriteOutcome {
        self.dispatch(StoreAction::SetCenter(center))
    }

    fn set_zoom(&self, zoom: f64) -> WriteOutcome {
        self.dispatch(StoreAction::SetZoom(zoom))
    }

    fn set_show_unselected(&self, show: bool) -> WriteOutcome {
        self.dispatch(StoreAction::SetShowUnselected(show))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::DVec2;

    /// A store exposing only reads.
    pub(crate) struct ReadOnlyStore(pub MapViewState);

    impl MapStore for ReadOnlyStore {
        fn snapshot(&self) -> MapViewState {
            self.0.clone()
        }
    }

    fn store() -> Rc<SharedMapStore> {
        SharedMapStore::new(
            MapViewState::default(),
            ["Bolivia", "Japan", "United States"].map(String::from),
        )
    }

    #[test]
    fn select_by_name_recenters_from_reference() {
        let s = store();
        assert_eq!(s.select_country_by_name("Japan"), WriteOutcome::Applied);
        let view = s.snapshot();
        let japan = reference::find("Japan").unwrap();
        assert_eq!(view.selected.as_deref(), Some("Japan"));
        assert_eq!(view.center, japan.center);
        assert_eq!(view.zoom, japan.zoom);
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn select_by_alias_is_standardized() {
        let s = store();
        s.select_country_by_name("United States of America");
        assert_eq!(s.snapshot().selected.as_deref(), Some("United States"));
    }

    #[test]
    fn known_name_without_record_selects_in_place() {
        let s = store();
        s.set_center(DVec2::new(5.0, 5.0));
        assert_eq!(s.select_country_by_name("Bolivia"), WriteOutcome::Applied);
        let view = s.snapshot();
        assert_eq!(view.selected.as_deref(), Some("Bolivia"));
        assert_eq!(view.center, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn unknown_name_leaves_state_unchanged() {
        let s = store();
        s.select_country_by_name("Japan");
        let before = s.snapshot();
        assert_eq!(s.select_country_by_name("Atlantis"), WriteOutcome::Ignored);
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.revision(), 1);
    }

    #[test]
    fn recorded_but_undrawable_name_is_ignored() {
        let s = store();
        assert!(reference::find("Kenya").is_some());
        assert_eq!(s.select_country_by_name("Kenya"), WriteOutcome::Ignored);
        assert_eq!(s.snapshot(), MapViewState::default());
        assert_eq!(s.revision(), 0);
    }

    #[test]
    fn builtin_world_store_rejects_missing_countries() {
        let ds = crate::data::builtin_world();
        let s = SharedMapStore::new(MapViewState::default(), ds.names().iter().cloned());
        assert_eq!(s.select_country_by_name("Kenya"), WriteOutcome::Ignored);
        assert_eq!(s.snapshot().selected, None);
        assert_eq!(s.select_country_by_name("Sri Lanka"), WriteOutcome::Applied);
        let selected = s.snapshot().selected.unwrap();
        assert!(ds.index_of(&selected).is_some());
    }

    #[test]
    fn zoom_writes_are_clamped() {
        let s = store();
        s.set_zoom(0.1);
        assert_eq!(s.snapshot().zoom, 1.0);
        s.set_zoom(12.0);
        assert_eq!(s.snapshot().zoom, 8.0);
    }

    #[test]
    fn handles_share_one_state() {
        let s = store();
        let a: StoreHandle = s.clone();
        let b: StoreHandle = s.clone();
        a.select_country_by_name("Japan");
        assert_eq!(b.snapshot().selected.as_deref(), Some("Japan"));
        b.set_show_unselected(false);
        assert!(!a.snapshot().show_unselected);
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let ro = ReadOnlyStore(MapViewState::default());
        assert_eq!(ro.select_country_by_name("Japan"), WriteOutcome::Unsupported);
        assert_eq!(ro.set_center(DVec2::ONE), WriteOutcome::Unsupported);
        assert_eq!(ro.set_zoom(2.0), WriteOutcome::Unsupported);
        assert_eq!(ro.revision(), 0);
    }
}
