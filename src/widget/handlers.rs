//! Pure pointer-event handlers.
//!
//! Each handler takes an event description and the current state and returns
//! what should change. Nothing here touches a terminal or a store, so the
//! whole interaction contract is testable on plain values.

use crate::map::clamp_zoom;
use crate::view::{Coord, Intent, MapViewState};

/// Rows between the pointer and the tooltip label.
pub const TOOLTIP_OFFSET_ROWS: u16 = 2;

/// Hover label owned by a single widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub label: String,
    /// Pointer cell (column, row) when the region was entered
    pub anchor: (u16, u16),
}

impl Tooltip {
    /// Cell where the label's first character goes, lifted above the anchor.
    pub fn label_origin(&self) -> (u16, u16) {
        (self.anchor.0, self.anchor.1.saturating_sub(TOOLTIP_OFFSET_ROWS))
    }
}

/// Pointer activity over the map. Region names are standardized.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent<'a> {
    Enter { region: &'a str, anchor: (u16, u16) },
    Leave { region: &'a str },
    Click { region: &'a str },
    MoveEnd { center: Coord, zoom: f64 },
}

/// What an event changes: the tooltip to show next and an optional state
/// change for the access adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub tooltip: Option<Tooltip>,
    pub intent: Option<Intent>,
}

pub fn react(event: &PointerEvent<'_>, view: &MapViewState, tooltip: Option<Tooltip>) -> Reaction {
    match *event {
        PointerEvent::Enter { region, anchor } => Reaction {
            tooltip: on_pointer_enter(view, region, anchor).or(tooltip),
            intent: None,
        },
        PointerEvent::Leave { .. } => Reaction {
            tooltip: None,
            intent: None,
        },
        PointerEvent::Click { region } => Reaction {
            tooltip,
            intent: on_click(view, region),
        },
        PointerEvent::MoveEnd { center, zoom } => Reaction {
            tooltip,
            intent: Some(on_move_end(center, zoom)),
        },
    }
}

/// A tooltip opens only over visible, unselected regions.
pub fn on_pointer_enter(view: &MapViewState, region: &str, anchor: (u16, u16)) -> Option<Tooltip> {
    view.tooltip_eligible(region).then(|| Tooltip {
        label: region.to_string(),
        anchor,
    })
}

/// Clicking a visible region selects it; hidden regions ignore clicks.
pub fn on_click(view: &MapViewState, region: &str) -> Option<Intent> {
    view.is_visible(region).then(|| Intent::Select(region.to_string()))
}

/// A finished pan/zoom gesture, with zoom kept in bounds.
pub fn on_move_end(center: Coord, zoom: f64) -> Intent {
    Intent::Move {
        center,
        zoom: clamp_zoom(zoom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::apply_intent;
    use glam::DVec2;
    use proptest::prelude::*;

    fn state(selected: Option<&str>, show: bool) -> MapViewState {
        MapViewState {
            selected: selected.map(str::to_string),
            show_unselected: show,
            ..MapViewState::default()
        }
    }

    #[test]
    fn enter_unselected_shows_tooltip() {
        let tip = on_pointer_enter(&state(Some("Japan"), true), "Brazil", (10, 5)).unwrap();
        assert_eq!(tip.label, "Brazil");
        assert_eq!(tip.anchor, (10, 5));
        assert_eq!(tip.label_origin(), (10, 3));
    }

    #[test]
    fn enter_selected_or_hidden_shows_nothing() {
        assert_eq!(on_pointer_enter(&state(Some("Japan"), true), "Japan", (0, 0)), None);
        assert_eq!(on_pointer_enter(&state(Some("Japan"), false), "Brazil", (0, 0)), None);
        assert_eq!(on_pointer_enter(&state(Some("Japan"), false), "Japan", (0, 0)), None);
    }

    #[test]
    fn leave_always_clears() {
        let tip = Some(Tooltip {
            label: "Brazil".into(),
            anchor: (1, 1),
        });
        let r = react(&PointerEvent::Leave { region: "Brazil" }, &state(None, true), tip);
        assert_eq!(r.tooltip, None);
        assert_eq!(r.intent, None);
    }

    #[test]
    fn enter_hidden_keeps_no_tooltip() {
        let r = react(
            &PointerEvent::Enter {
                region: "Brazil",
                anchor: (1, 1),
            },
            &state(Some("Japan"), false),
            None,
        );
        assert_eq!(r.tooltip, None);
    }

    #[test]
    fn click_selects_visible_region_idempotently() {
        let s = state(Some("Japan"), true);
        let intent = on_click(&s, "Brazil").unwrap();
        let after = apply_intent(&s, &intent);
        assert!(after.is_selected("Brazil"));
        let again = apply_intent(&after, &on_click(&after, "Brazil").unwrap());
        assert_eq!(after, again);
    }

    #[test]
    fn click_on_hidden_region_is_ignored() {
        assert_eq!(on_click(&state(Some("Japan"), false), "Brazil"), None);
        assert_eq!(
            on_click(&state(Some("Japan"), false), "Japan"),
            Some(Intent::Select("Japan".into()))
        );
    }

    #[test]
    fn move_end_clamps_zoom() {
        assert_eq!(
            on_move_end(DVec2::ONE, 0.5),
            Intent::Move {
                center: DVec2::ONE,
                zoom: 1.0
            }
        );
        let r = react(
            &PointerEvent::MoveEnd {
                center: DVec2::ZERO,
                zoom: 9.0,
            },
            &state(None, true),
            None,
        );
        assert_eq!(
            r.intent,
            Some(Intent::Move {
                center: DVec2::ZERO,
                zoom: 8.0
            })
        );
    }

    proptest! {
        #[test]
        fn tooltip_iff_shown_and_unselected(show in any::<bool>(), pick in 0usize..3, hover in 0usize..3) {
            let names = ["A", "B", "C"];
            let s = state(Some(names[pick]), show);
            let tip = on_pointer_enter(&s, names[hover], (0, 0));
            prop_assert_eq!(tip.is_some(), show && pick != hover);
        }

        #[test]
        fn clickable_iff_selected_or_shown(show in any::<bool>(), pick in 0usize..3, click in 0usize..3) {
            let names = ["A", "B", "C"];
            let s = state(Some(names[pick]), show);
            prop_assert_eq!(on_click(&s, names[click]).is_some(), show || pick == click);
        }
    }
}
