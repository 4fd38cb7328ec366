//! The interactive world map widget.
//!
//! A [`WorldMap`] draws every region of a [`Dataset`], tracks hover, press and
//! drag gestures, and routes the resulting state changes through its
//! [`ViewAccess`] adapter. Which adapter it gets (private state or a shared
//! store) is decided once, in [`WorldMap::new`].

mod access;
pub mod handlers;
pub mod style;

pub use access::{ConnectedView, LocalView, ViewAccess};
pub use handlers::{PointerEvent, Tooltip};

use crate::country::resolve_initial;
use crate::data::{Dataset, RegionNames};
use crate::map::{draw_ring, fill_polygon, BrailleCanvas, PixelRing, Viewport, ZOOM_STEP};
use crate::store::StoreHandle;
use crate::view::{Intent, MapViewState};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use handlers::react;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Widget},
};
use rayon::prelude::*;
use std::cell::Cell;
use style::{region_style, Interaction, BACKGROUND};
use tracing::{debug, trace, warn};

const TOOLTIP_FG: Color = Color::White;
const TOOLTIP_BG: Color = Color::Rgb(31, 41, 55);

/// Construction inputs for a [`WorldMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorldMapProps {
    /// Display name to start on; wins over `init_country_code`.
    pub initial_country: Option<String>,
    /// ISO 3166-1 alpha-2 code to start on.
    pub init_country_code: Option<String>,
    /// Initial visibility of unselected regions (standalone only).
    pub default_show_unselected: bool,
    /// Own private state instead of using the shared store.
    pub standalone: bool,
}

impl Default for WorldMapProps {
    fn default() -> Self {
        Self {
            initial_country: None,
            init_country_code: None,
            default_show_unselected: true,
            standalone: false,
        }
    }
}

/// An in-progress drag. The map follows this viewport until the button is
/// released, then reports one move-end.
struct Gesture {
    viewport: Viewport,
    last: (u16, u16),
    moved: bool,
}

pub struct WorldMap {
    props: WorldMapProps,
    access: Box<dyn ViewAccess>,
    store: Option<StoreHandle>,
    /// Names the private adapter may select
    drawable: RegionNames,
    tooltip: Option<Tooltip>,
    hovered: Option<usize>,
    pressed: Option<usize>,
    gesture: Option<Gesture>,
    seen_revision: u64,
    /// Inner area of the last render, for mapping pointer cells to pixels
    area: Cell<Rect>,
}

impl WorldMap {
    /// Build a map over `dataset`. Connected maps need `store`; without one
    /// they fall back to private state.
    pub fn new(props: WorldMapProps, store: Option<StoreHandle>, dataset: &Dataset) -> Self {
        let drawable = dataset.names();
        let access = Self::build_access(&props, store.as_ref(), &drawable);
        let mut map = Self {
            props,
            access,
            store,
            drawable,
            tooltip: None,
            hovered: None,
            pressed: None,
            gesture: None,
            seen_revision: 0,
            area: Cell::new(Rect::default()),
        };
        map.initialize();
        map.seen_revision = map.access.revision();
        map
    }

    /// A map with private state.
    pub fn standalone(props: WorldMapProps, dataset: &Dataset) -> Self {
        Self::new(
            WorldMapProps {
                standalone: true,
                ..props
            },
            None,
            dataset,
        )
    }

    fn build_access(
        props: &WorldMapProps,
        store: Option<&StoreHandle>,
        drawable: &RegionNames,
    ) -> Box<dyn ViewAccess> {
        let local = || -> Box<dyn ViewAccess> {
            Box::new(LocalView::new(props.default_show_unselected, drawable.clone()))
        };
        match (props.standalone, store) {
            (false, Some(store)) => Box::new(ConnectedView::new(store.clone())),
            (false, None) => {
                warn!("connected map built without a store; using private state");
                local()
            }
            (true, _) => local(),
        }
    }

    fn initialize(&mut self) {
        let target = resolve_initial(
            self.props.initial_country.as_deref(),
            self.props.init_country_code.as_deref(),
        );
        match target {
            Some(name) => {
                debug!(name, standalone = self.access.is_standalone(), "initializing map");
                self.access.initialize(&name);
            }
            None => trace!("no initial country"),
        }
    }

    /// Replace the inputs. Changing the initial country or the mode re-runs
    /// initialisation; other changes only update the stored props.
    pub fn set_props(&mut self, props: WorldMapProps) {
        if props == self.props {
            return;
        }
        let mode_changed = props.standalone != self.props.standalone;
        let inputs_changed = props.initial_country != self.props.initial_country
            || props.init_country_code != self.props.init_country_code;
        self.props = props;
        if mode_changed {
            self.access = Self::build_access(&self.props, self.store.as_ref(), &self.drawable);
            self.clear_pointer();
        }
        if mode_changed || inputs_changed {
            self.initialize();
        }
    }

    pub fn props(&self) -> &WorldMapProps {
        &self.props
    }

    pub fn view(&self) -> MapViewState {
        self.access.view()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn is_standalone(&self) -> bool {
        self.access.is_standalone()
    }

    /// Drive deferred initialisation. Returns true when the map needs a redraw.
    pub fn poll(&mut self) -> bool {
        let applied = self.access.poll();
        let revision = self.access.revision();
        let changed = applied || revision != self.seen_revision;
        self.seen_revision = revision;
        changed
    }

    /// Block until deferred initialisation has been applied.
    pub fn settle(&mut self) {
        self.access.settle();
        self.seen_revision = self.access.revision();
    }

    /// Viewport for an inner area: the drag viewport while a gesture is live,
    /// otherwise the state's camera.
    pub fn viewport_for(&self, area: Rect) -> Viewport {
        let width = area.width as usize * 2;
        let height = area.height as usize * 4;
        match &self.gesture {
            Some(g) => Viewport {
                width,
                height,
                ..g.viewport.clone()
            },
            None => {
                let view = self.access.view();
                Viewport::new(view.center, view.zoom, width, height)
            }
        }
    }

    /// Remember the area the map occupies so pointer cells can be mapped
    /// before the next draw.
    pub fn set_area(&self, area: Rect) {
        self.area.set(area);
    }

    pub fn area(&self) -> Rect {
        self.area.get()
    }

    /// Braille pixel at the center of a terminal cell, relative to the map.
    fn pixel_at(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.area.get();
        if !area.contains(Position::new(col, row)) {
            return None;
        }
        let px = (col - area.x) as i32 * 2 + 1;
        let py = (row - area.y) as i32 * 4 + 2;
        Some((px, py))
    }

    /// Interactive region under a terminal cell. Hidden regions never match.
    pub fn region_at(&self, dataset: &Dataset, col: u16, row: u16) -> Option<usize> {
        let (px, py) = self.pixel_at(col, row)?;
        let (lon, lat) = self.viewport_for(self.area.get()).unproject(px, py);
        let idx = dataset.hit_test(lon, lat)?;
        let region = dataset.region(idx)?;
        self.access.view().is_visible(&region.name).then_some(idx)
    }

    fn dispatch(&mut self, event: PointerEvent<'_>) {
        let view = self.access.view();
        let reaction = react(&event, &view, self.tooltip.take());
        self.tooltip = reaction.tooltip;
        if let Some(intent) = reaction.intent {
            trace!(?intent, "map intent");
            self.access.apply(intent);
        }
    }

    fn update_hover(&mut self, dataset: &Dataset, col: u16, row: u16) {
        let hit = self.region_at(dataset, col, row);
        if hit == self.hovered {
            return;
        }
        if let Some(region) = self.hovered.and_then(|i| dataset.region(i)) {
            self.dispatch(PointerEvent::Leave { region: &region.name });
        }
        self.hovered = hit;
        if let Some(region) = hit.and_then(|i| dataset.region(i)) {
            self.dispatch(PointerEvent::Enter {
                region: &region.name,
                anchor: (col, row),
            });
        }
    }

    /// Forget hover and press, e.g. when the pointer leaves the map.
    pub fn clear_pointer(&mut self) {
        self.hovered = None;
        self.pressed = None;
        self.tooltip = None;
        self.gesture = None;
    }

    /// Whether a left-button gesture has moved the map since it was pressed.
    pub fn is_dragging(&self) -> bool {
        self.gesture.as_ref().is_some_and(|g| g.moved)
    }

    fn finish_move(&mut self, viewport: &Viewport) {
        self.dispatch(PointerEvent::MoveEnd {
            center: viewport.center,
            zoom: viewport.zoom,
        });
    }

    /// Handle a mouse event. Returns true when the event landed on the map.
    pub fn handle_mouse(&mut self, dataset: &Dataset, mouse: MouseEvent) -> bool {
        let (col, row) = (mouse.column, mouse.row);
        let inside = self.pixel_at(col, row).is_some();

        match mouse.kind {
            MouseEventKind::Moved => {
                if inside || self.hovered.is_some() {
                    self.update_hover(dataset, col, row);
                }
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.pressed = self.region_at(dataset, col, row);
                self.gesture = Some(Gesture {
                    viewport: self.viewport_for(self.area.get()),
                    last: (col, row),
                    moved: false,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(g) = self.gesture.as_mut() {
                    let dx = (g.last.0 as i32 - col as i32) * 2;
                    let dy = (g.last.1 as i32 - row as i32) * 4;
                    if dx != 0 || dy != 0 {
                        g.viewport.pan(dx, dy);
                        g.moved = true;
                        g.last = (col, row);
                        self.pressed = None;
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                match self.gesture.take() {
                    Some(g) if g.moved => self.finish_move(&g.viewport),
                    Some(_) => {
                        let released = self.region_at(dataset, col, row);
                        let clicked = pressed.filter(|&p| Some(p) == released);
                        if let Some(region) = clicked.and_then(|i| dataset.region(i)) {
                            self.dispatch(PointerEvent::Click { region: &region.name });
                        }
                    }
                    None => {}
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown if inside => {
                if let Some((px, py)) = self.pixel_at(col, row) {
                    let mut vp = self.viewport_for(self.area.get());
                    let factor = if mouse.kind == MouseEventKind::ScrollUp {
                        ZOOM_STEP
                    } else {
                        1.0 / ZOOM_STEP
                    };
                    vp.zoom_at(px, py, factor);
                    self.finish_move(&vp);
                }
            }
            MouseEventKind::ScrollLeft if inside => self.pan(-30, 0),
            MouseEventKind::ScrollRight if inside => self.pan(30, 0),
            _ => return inside,
        }
        inside
    }

    /// Pan by braille pixels and report the move.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        let mut vp = self.viewport_for(self.area.get());
        vp.pan(dx, dy);
        self.finish_move(&vp);
    }

    /// Zoom around the map center and report the move.
    pub fn zoom_by(&mut self, factor: f64) {
        let area = self.area.get();
        let mut vp = self.viewport_for(area);
        vp.zoom_at(vp.width as i32 / 2, vp.height as i32 / 2, factor);
        self.finish_move(&vp);
    }

    /// Keyboard controls shared by every map. Returns true when handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.pan(-20, 0),
            KeyCode::Right | KeyCode::Char('l') => self.pan(20, 0),
            KeyCode::Up | KeyCode::Char('k') => self.pan(0, -12),
            KeyCode::Down | KeyCode::Char('j') => self.pan(0, 12),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_by(ZOOM_STEP),
            KeyCode::Char('-') | KeyCode::Char('_') => self.zoom_by(1.0 / ZOOM_STEP),
            KeyCode::Char('u') | KeyCode::Char('U') => {
                let show = !self.access.view().show_unselected;
                self.access.apply(Intent::ShowUnselected(show));
                self.clear_pointer();
            }
            KeyCode::Char('r') | KeyCode::Char('0') => self.finish_move(&Viewport::world(0, 0)),
            _ => return false,
        }
        true
    }

    /// Zoom level and center formatted for a status line.
    pub fn camera_summary(&self) -> String {
        let view = self.access.view();
        format!(
            "{:.1}x {:.1}°{}, {:.1}°{}",
            view.zoom,
            view.center.y.abs(),
            if view.center.y >= 0.0 { "N" } else { "S" },
            view.center.x.abs(),
            if view.center.x >= 0.0 { "E" } else { "W" }
        )
    }

    /// Renderable view of this map over `dataset`.
    pub fn widget<'a>(&'a self, dataset: &'a Dataset) -> MapView<'a> {
        MapView {
            map: self,
            dataset,
            block: None,
        }
    }
}

/// Paint order of a layer; higher ranks draw over lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Unselected,
    Border,
    Selected,
    Active,
}

struct Layer {
    rank: Rank,
    color: Color,
    canvas: BrailleCanvas,
}

fn layer_mut(layers: &mut Vec<Layer>, rank: Rank, color: Color, width: usize, height: usize) -> &mut BrailleCanvas {
    let idx = match layers.iter().position(|l| l.rank == rank && l.color == color) {
        Some(idx) => idx,
        None => {
            layers.push(Layer {
                rank,
                color,
                canvas: BrailleCanvas::new(width, height),
            });
            layers.len() - 1
        }
    };
    &mut layers[idx].canvas
}

/// ratatui widget drawing a [`WorldMap`].
pub struct MapView<'a> {
    map: &'a WorldMap,
    dataset: &'a Dataset,
    block: Option<Block<'a>>,
}

impl<'a> MapView<'a> {
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Build the colored braille layers for an inner area of `cols` x `rows`.
    fn layers(&self, viewport: &Viewport, cols: usize, rows: usize) -> Vec<Layer> {
        let view = self.map.access.view();
        let max_jump = (viewport.width as i32 / 2).max(1);

        // Projection is the expensive part; do it in parallel
        let projected: Vec<(usize, Vec<Vec<PixelRing>>)> = self
            .dataset
            .regions()
            .par_iter()
            .enumerate()
            .filter(|(_, r)| view.is_visible(&r.name))
            .filter(|(_, r)| viewport.bbox_might_be_visible(r.min, r.max))
            .map(|(idx, r)| {
                let polygons = r
                    .polygons
                    .iter()
                    .map(|rings| {
                        rings
                            .iter()
                            .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect())
                            .collect()
                    })
                    .collect();
                (idx, polygons)
            })
            .collect();

        let mut layers = Vec::new();
        for (idx, polygons) in &projected {
            let Some(region) = self.dataset.region(*idx) else {
                continue;
            };
            let selected = view.is_selected(&region.name);
            let interaction = if self.map.pressed == Some(*idx) {
                Interaction::Pressed
            } else if self.map.hovered == Some(*idx) {
                Interaction::Hovered
            } else {
                Interaction::Idle
            };
            let look = region_style(selected, view.show_unselected).for_interaction(interaction);
            if !look.opaque {
                continue;
            }
            let rank = match (interaction, selected) {
                (Interaction::Idle, false) => Rank::Unselected,
                (Interaction::Idle, true) => Rank::Selected,
                _ => Rank::Active,
            };

            let fill = layer_mut(&mut layers, rank, look.fill, cols, rows);
            for rings in polygons {
                fill_polygon(fill, rings, max_jump);
            }
            if let Some(stroke) = look.stroke {
                let border = layer_mut(&mut layers, Rank::Border, stroke, cols, rows);
                for ring in polygons.iter().flatten() {
                    draw_ring(border, ring, max_jump);
                }
            }
        }

        layers.sort_by_key(|l| l.rank);
        layers
    }
}

fn paint(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
    for row in 0..canvas.height().min(area.height as usize) {
        for col in 0..canvas.width().min(area.width as usize) {
            if canvas.cell(col, row) == 0 {
                continue;
            }
            let x = area.x + col as u16;
            let y = area.y + row as u16;
            buf[(x, y)].set_char(canvas.glyph(col, row)).set_fg(color);
        }
    }
}

fn paint_tooltip(tooltip: &Tooltip, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let label = format!(" {} ", tooltip.label);
    let width = (label.chars().count() as u16).min(area.width);
    let (ax, ay) = tooltip.label_origin();
    let x = ax.clamp(area.x, area.right().saturating_sub(width));
    let y = ay.clamp(area.y, area.bottom().saturating_sub(1));
    buf.set_stringn(
        x,
        y,
        &label,
        width as usize,
        Style::default().fg(TOOLTIP_FG).bg(TOOLTIP_BG),
    );
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        self.map.set_area(inner);
        if inner.is_empty() {
            return;
        }

        buf.set_style(inner, Style::default().bg(BACKGROUND));
        let viewport = self.map.viewport_for(inner);
        for layer in self.layers(&viewport, inner.width as usize, inner.height as usize) {
            paint(&layer.canvas, layer.color, inner, buf);
        }

        if let Some(tooltip) = &self.map.tooltip {
            paint_tooltip(tooltip, inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_world;
    use crate::store::{MapStore, SharedMapStore};
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn standalone(country: &str, show: bool) -> WorldMap {
        let mut map = WorldMap::standalone(
            WorldMapProps {
                initial_country: Some(country.to_string()),
                default_show_unselected: show,
                ..WorldMapProps::default()
            },
            &builtin_world(),
        );
        map.settle();
        map
    }

    /// Terminal cell over a geographic point for the map's current view.
    fn cell_of(map: &WorldMap, lon: f64, lat: f64) -> (u16, u16) {
        let area = map.area();
        let (px, py) = map.viewport_for(area).project(lon, lat);
        (area.x + (px / 2) as u16, area.y + (py / 4) as u16)
    }

    fn rendered(map: &WorldMap, dataset: &Dataset, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        map.widget(dataset).render(area, &mut buf);
        buf
    }

    #[test]
    fn standalone_brazil_hides_everything_else() {
        let ds = builtin_world();
        let map = standalone("Brazil", false);
        let view = map.view();
        assert_eq!(view.selected.as_deref(), Some("Brazil"));
        for region in ds.regions() {
            let style = region_style(view.is_selected(&region.name), view.show_unselected);
            if region.name == "Brazil" {
                assert!(style.default.interactive);
            } else {
                assert!(!style.default.opaque && !style.default.interactive, "{}", region.name);
            }
        }
    }

    #[test]
    fn code_resolves_to_record() {
        let mut map = WorldMap::standalone(
            WorldMapProps {
                init_country_code: Some("US".into()),
                ..WorldMapProps::default()
            },
            &builtin_world(),
        );
        map.settle();
        let view = map.view();
        let us = crate::country::reference::find("United States").unwrap();
        assert_eq!(view.selected.as_deref(), Some("United States"));
        assert_eq!(view.center, us.center);
        assert_eq!(view.zoom, us.zoom);
    }

    #[test]
    fn unresolved_props_keep_state() {
        let mut map = standalone("Japan", true);
        map.set_props(WorldMapProps {
            initial_country: Some("Atlantis".into()),
            standalone: true,
            ..WorldMapProps::default()
        });
        map.settle();
        assert_eq!(map.view().selected.as_deref(), Some("Japan"));
    }

    #[test]
    fn changed_props_reinitialize() {
        let mut map = standalone("Japan", true);
        map.set_props(WorldMapProps {
            initial_country: Some("Sri Lanka".into()),
            standalone: true,
            ..WorldMapProps::default()
        });
        map.settle();
        assert_eq!(map.view().selected.as_deref(), Some("Sri Lanka"));
    }

    #[test]
    fn render_paints_selected_in_accent() {
        let ds = builtin_world();
        let map = standalone("Brazil", false);
        let area = Rect::new(0, 0, 60, 20);
        let buf = rendered(&map, &ds, area);
        let (col, row) = cell_of(&map, -53.0, -10.5);
        assert_eq!(buf[(col, row)].fg, style::ACCENT);
        // Nothing but background and accent when unselected regions are hidden
        for y in 0..area.height {
            for x in 0..area.width {
                let cell = &buf[(x, y)];
                assert!(cell.symbol() == " " || cell.fg == style::ACCENT, "({x},{y})");
            }
        }
    }

    #[test]
    fn hover_and_leave_manage_tooltip() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", true);
        let area = Rect::new(0, 0, 80, 30);
        rendered(&map, &ds, area);

        let (col, row) = cell_of(&map, -64.0, -35.0); // Argentina
        map.handle_mouse(&ds, mouse(MouseEventKind::Moved, col, row));
        assert_eq!(map.tooltip().map(|t| t.label.as_str()), Some("Argentina"));

        // Over the selected country: leave Argentina, no new tooltip
        let (col, row) = cell_of(&map, -53.0, -10.5);
        map.handle_mouse(&ds, mouse(MouseEventKind::Moved, col, row));
        assert_eq!(map.tooltip(), None);

        // Outside the widget entirely
        map.handle_mouse(&ds, mouse(MouseEventKind::Moved, 200, 200));
        assert_eq!(map.tooltip(), None);
    }

    #[test]
    fn hidden_regions_never_tooltip() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", false);
        rendered(&map, &ds, Rect::new(0, 0, 80, 30));
        let (col, row) = cell_of(&map, -64.0, -35.0);
        assert_eq!(map.region_at(&ds, col, row), None);
        map.handle_mouse(&ds, mouse(MouseEventKind::Moved, col, row));
        assert_eq!(map.tooltip(), None);
    }

    #[test]
    fn click_selects_region() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", true);
        rendered(&map, &ds, Rect::new(0, 0, 80, 30));
        let (col, row) = cell_of(&map, -64.0, -35.0);
        map.handle_mouse(&ds, mouse(MouseEventKind::Down(MouseButton::Left), col, row));
        map.handle_mouse(&ds, mouse(MouseEventKind::Up(MouseButton::Left), col, row));
        assert_eq!(map.view().selected.as_deref(), Some("Argentina"));
    }

    #[test]
    fn drag_reports_one_move_end() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", true);
        rendered(&map, &ds, Rect::new(0, 0, 80, 30));
        let before = map.view();
        map.handle_mouse(&ds, mouse(MouseEventKind::Down(MouseButton::Left), 40, 15));
        map.handle_mouse(&ds, mouse(MouseEventKind::Drag(MouseButton::Left), 30, 15));
        // Still mid-gesture: state untouched
        assert_eq!(map.view(), before);
        map.handle_mouse(&ds, mouse(MouseEventKind::Up(MouseButton::Left), 30, 15));
        let after = map.view();
        assert!(after.center.x > before.center.x);
        assert_eq!(after.selected, before.selected);
    }

    #[test]
    fn scroll_zoom_stays_in_bounds() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", true);
        rendered(&map, &ds, Rect::new(0, 0, 80, 30));
        for _ in 0..20 {
            map.handle_mouse(&ds, mouse(MouseEventKind::ScrollUp, 40, 15));
        }
        assert_eq!(map.view().zoom, 8.0);
        for _ in 0..20 {
            map.handle_mouse(&ds, mouse(MouseEventKind::ScrollDown, 40, 15));
        }
        assert_eq!(map.view().zoom, 1.0);
    }

    #[test]
    fn connected_maps_stay_in_sync() {
        let ds = builtin_world();
        let store = SharedMapStore::new(
            MapViewState::default(),
            ds.regions().iter().map(|r| r.name.clone()),
        );
        let mut a = WorldMap::new(
            WorldMapProps {
                initial_country: Some("Japan".into()),
                ..WorldMapProps::default()
            },
            Some(store.clone()),
            &ds,
        );
        let mut b = WorldMap::new(WorldMapProps::default(), Some(store.clone()), &ds);
        assert_eq!(b.view().selected.as_deref(), Some("Japan"));
        assert!(!b.poll());

        rendered(&a, &ds, Rect::new(0, 0, 80, 30));
        a.handle_key(KeyCode::Char('+'));
        assert_eq!(b.view().zoom, a.view().zoom);
        assert_eq!(store.snapshot().zoom, a.view().zoom);
        assert!(b.poll());
    }

    #[test]
    fn standalone_ignores_store() {
        let store = SharedMapStore::new(MapViewState::default(), Vec::new());
        let handle: StoreHandle = store.clone();
        let mut map = WorldMap::new(
            WorldMapProps {
                initial_country: Some("Japan".into()),
                standalone: true,
                ..WorldMapProps::default()
            },
            Some(handle),
            &builtin_world(),
        );
        map.settle();
        map.handle_key(KeyCode::Char('+'));
        assert_eq!(store.revision(), 0);
        assert!(map.is_standalone());
    }

    #[test]
    fn toggle_visibility_clears_tooltip() {
        let ds = builtin_world();
        let mut map = standalone("Brazil", true);
        rendered(&map, &ds, Rect::new(0, 0, 80, 30));
        let (col, row) = cell_of(&map, -64.0, -35.0);
        map.handle_mouse(&ds, mouse(MouseEventKind::Moved, col, row));
        assert!(map.tooltip().is_some());
        map.handle_key(KeyCode::Char('u'));
        assert!(!map.view().show_unselected);
        assert_eq!(map.tooltip(), None);
    }

    #[test]
    fn connected_without_store_falls_back() {
        let map = WorldMap::new(WorldMapProps::default(), None, &builtin_world());
        assert!(map.is_standalone());
    }

    #[test]
    fn standalone_skips_countries_missing_from_dataset() {
        let ds = crate::data::tests::two_squares();
        let mut map = WorldMap::standalone(
            WorldMapProps {
                initial_country: Some("Japan".into()),
                ..WorldMapProps::default()
            },
            &ds,
        );
        map.settle();
        assert_eq!(map.view(), MapViewState::default());
    }
}
