//! Map view state shared by the widget, its adapters, and the store.

use crate::map::{clamp_zoom, normalize_center, MIN_ZOOM};
use glam::DVec2;

/// (longitude, latitude) in degrees.
pub type Coord = DVec2;

/// Selection, camera, and visibility for one map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewState {
    /// Standardized display name of the selected country
    pub selected: Option<String>,
    pub center: Coord,
    /// Always within [`crate::map::MIN_ZOOM`, `crate::map::MAX_ZOOM`]
    pub zoom: f64,
    pub show_unselected: bool,
}

impl Default for MapViewState {
    fn default() -> Self {
        Self {
            selected: None,
            center: DVec2::ZERO,
            zoom: MIN_ZOOM,
            show_unselected: true,
        }
    }
}

impl MapViewState {
    pub fn with_show_unselected(show_unselected: bool) -> Self {
        Self {
            show_unselected,
            ..Self::default()
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.as_deref() == Some(name)
    }

    /// A region is drawn and reacts to the pointer iff it is selected or
    /// unselected regions are shown.
    pub fn is_visible(&self, name: &str) -> bool {
        self.show_unselected || self.is_selected(name)
    }

    /// Hovering opens a tooltip only over shown, unselected regions.
    pub fn tooltip_eligible(&self, name: &str) -> bool {
        self.show_unselected && !self.is_selected(name)
    }
}

/// A requested change to view state, produced by the pure event handlers and
/// applied by whichever adapter owns the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Make this standardized name the selection.
    Select(String),
    /// A pan/zoom gesture finished here.
    Move { center: Coord, zoom: f64 },
    ShowUnselected(bool),
}

/// Apply an intent to a state value, returning the new state.
pub fn apply_intent(state: &MapViewState, intent: &Intent) -> MapViewState {
    let mut next = state.clone();
    match intent {
        Intent::Select(name) => next.selected = Some(name.clone()),
        Intent::Move { center, zoom } => {
            next.center = normalize_center(*center);
            next.zoom = clamp_zoom(*zoom);
        }
        Intent::ShowUnselected(show) => next.show_unselected = *show,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MAX_ZOOM;
    use proptest::prelude::*;

    #[test]
    fn defaults_show_everything_at_world_zoom() {
        let s = MapViewState::default();
        assert_eq!(s.selected, None);
        assert_eq!(s.zoom, 1.0);
        assert!(s.show_unselected);
    }

    #[test]
    fn move_is_clamped() {
        let s = apply_intent(
            &MapViewState::default(),
            &Intent::Move {
                center: DVec2::new(10.0, 20.0),
                zoom: 40.0,
            },
        );
        assert_eq!(s.zoom, MAX_ZOOM);
        assert_eq!(s.center, DVec2::new(10.0, 20.0));
    }

    #[test]
    fn select_is_idempotent() {
        let once = apply_intent(&MapViewState::default(), &Intent::Select("Japan".into()));
        let twice = apply_intent(&once, &Intent::Select("Japan".into()));
        assert_eq!(once, twice);
        assert!(twice.is_selected("Japan"));
    }

    proptest! {
        #[test]
        fn visibility_rules(show in any::<bool>(), selected in proptest::option::of("[A-C]"), region in "[A-C]") {
            let state = MapViewState { selected: selected.clone(), show_unselected: show, ..MapViewState::default() };
            let is_sel = selected.as_deref() == Some(region.as_str());
            prop_assert_eq!(state.is_visible(&region), is_sel || show);
            prop_assert_eq!(state.tooltip_eligible(&region), show && !is_sel);
        }
    }
}
