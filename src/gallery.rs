//! The example gallery: one standalone map per preset, each with a
//! collapsible panel showing the code that builds it.

use crate::data::Dataset;
use crate::route::Route;
use crate::widget::style::{ACCENT, BACKGROUND};
use crate::widget::{WorldMap, WorldMapProps};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::cell::Cell;
use tracing::debug;

/// Preview height including its border.
pub const PREVIEW_ROWS: u16 = 10;
/// Title, description and toggle button.
const TEXT_ROWS: u16 = 3;
/// Code panel height including its border.
const CODE_ROWS: u16 = 7;
const ROW_GAP: u16 = 1;
const HEADER_ROWS: u16 = 2;

/// A gallery preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub country: &'static str,
    pub description: &'static str,
    pub show_unselected: bool,
    /// Literal code that builds this preview
    pub code: &'static str,
}

macro_rules! example {
    ($country:literal, $description:literal, $show:literal) => {
        Example {
            country: $country,
            description: $description,
            show_unselected: $show,
            code: concat!(
                "WorldMap::standalone(WorldMapProps {\n",
                "    initial_country: Some(\"",
                $country,
                "\".into()),\n",
                "    default_show_unselected: ",
                $show,
                ",\n",
                "    ..WorldMapProps::default()\n",
                "}, &dataset)"
            ),
        }
    };
}

pub const EXAMPLES: [Example; 6] = [
    example!("United States", "Default style example", true),
    example!("Russia", "Largest country", false),
    example!("Japan", "Island nation", true),
    example!("Brazil", "South America", false),
    example!("South Africa", "Southern hemisphere", true),
    example!("Sri Lanka", "Pearl of the Indian Ocean", false),
];

impl Example {
    pub fn props(&self) -> WorldMapProps {
        WorldMapProps {
            initial_country: Some(self.country.to_string()),
            default_show_unselected: self.show_unselected,
            standalone: true,
            ..WorldMapProps::default()
        }
    }

    /// Where clicking the preview leads.
    pub fn route(&self) -> Route {
        Route::root_with(self.country)
    }
}

/// Next expanded panel after clicking `clicked`'s toggle. At most one panel is
/// open; clicking the open one closes it.
pub fn toggle_expanded(current: Option<&'static str>, clicked: &'static str) -> Option<&'static str> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// Screen areas of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub preview: Rect,
    pub title: Rect,
    pub description: Rect,
    pub button: Rect,
    pub code: Option<Rect>,
}

pub fn columns_for(width: u16) -> usize {
    match width {
        w if w >= 120 => 3,
        w if w >= 76 => 2,
        _ => 1,
    }
}

/// Lay out `count` cards in a grid starting at card row `first_row`.
/// Cards that do not fully fit get `None`.
pub fn card_layout(area: Rect, count: usize, expanded: Option<usize>, first_row: usize) -> Vec<Option<CardLayout>> {
    let cols = columns_for(area.width);
    let col_width = area.width / cols as u16;
    let mut layouts = vec![None; count];
    let mut y = area.y;

    for row_start in (first_row * cols..count).step_by(cols) {
        let row = row_start..(row_start + cols).min(count);
        let open = expanded.is_some_and(|e| row.contains(&e));
        let height = PREVIEW_ROWS + TEXT_ROWS + if open { CODE_ROWS } else { 0 };
        if y + height > area.bottom() {
            break;
        }
        for (col, idx) in row.enumerate() {
            let x = area.x + col as u16 * col_width;
            let w = col_width.saturating_sub(1).max(1);
            let text_y = y + PREVIEW_ROWS;
            layouts[idx] = Some(CardLayout {
                preview: Rect::new(x, y, w, PREVIEW_ROWS),
                title: Rect::new(x, text_y, w, 1),
                description: Rect::new(x, text_y + 1, w, 1),
                button: Rect::new(x, text_y + 2, w, 1),
                code: (expanded == Some(idx)).then(|| Rect::new(x, text_y + TEXT_ROWS, w, CODE_ROWS)),
            });
        }
        y += height + ROW_GAP;
    }
    layouts
}

/// Something the gallery asks its host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    Navigate(Route),
}

pub struct Gallery {
    maps: Vec<WorldMap>,
    expanded: Option<&'static str>,
    focus: usize,
    /// Preview holding the left button, if any
    pressed: Option<usize>,
    first_row: Cell<usize>,
    /// Card grid area of the last render
    area: Cell<Rect>,
}

impl Gallery {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            maps: EXAMPLES
                .iter()
                .map(|e| WorldMap::standalone(e.props(), dataset))
                .collect(),
            expanded: None,
            focus: 0,
            pressed: None,
            first_row: Cell::new(0),
            area: Cell::new(Rect::default()),
        }
    }

    pub fn expanded(&self) -> Option<&'static str> {
        self.expanded
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn maps(&self) -> &[WorldMap] {
        &self.maps
    }

    pub fn poll(&mut self) -> bool {
        self.maps.iter_mut().fold(false, |changed, map| map.poll() | changed)
    }

    pub fn settle(&mut self) {
        self.maps.iter_mut().for_each(WorldMap::settle);
    }

    pub fn toggle(&mut self, idx: usize) {
        if let Some(example) = EXAMPLES.get(idx) {
            self.expanded = toggle_expanded(self.expanded, example.country);
            self.focus = idx;
            debug!(expanded = ?self.expanded, "code panel toggled");
        }
    }

    fn expanded_index(&self) -> Option<usize> {
        self.expanded.and_then(|c| EXAMPLES.iter().position(|e| e.country == c))
    }

    fn layouts(&self) -> Vec<Option<CardLayout>> {
        card_layout(
            self.area.get(),
            EXAMPLES.len(),
            self.expanded_index(),
            self.first_row.get(),
        )
    }

    /// Scroll so the focused card is laid out in `area`.
    fn scroll_to_focus(&self, area: Rect) {
        let cols = columns_for(area.width);
        let focus_row = self.focus / cols;
        if focus_row < self.first_row.get() {
            self.first_row.set(focus_row);
        }
        while self.first_row.get() < focus_row
            && card_layout(area, EXAMPLES.len(), self.expanded_index(), self.first_row.get())[self.focus].is_none()
        {
            self.first_row.set(self.first_row.get() + 1);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Option<GalleryAction> {
        let n = EXAMPLES.len();
        let cols = columns_for(self.area.get().width);
        match code {
            KeyCode::Tab | KeyCode::Right => self.focus = (self.focus + 1) % n,
            KeyCode::BackTab | KeyCode::Left => self.focus = (self.focus + n - 1) % n,
            KeyCode::Down => self.focus = (self.focus + cols).min(n - 1),
            KeyCode::Up => self.focus = self.focus.saturating_sub(cols),
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle(self.focus),
            KeyCode::Char('o') => return Some(GalleryAction::Navigate(EXAMPLES[self.focus].route())),
            _ => {}
        }
        None
    }

    pub fn handle_mouse(&mut self, dataset: &Dataset, mouse: MouseEvent) -> Option<GalleryAction> {
        let pos = Position::new(mouse.column, mouse.row);
        let layouts = self.layouts();
        let hit = |pick: fn(&CardLayout) -> Rect| {
            layouts
                .iter()
                .position(|l| l.as_ref().is_some_and(|l| pick(l).contains(pos)))
        };

        match mouse.kind {
            MouseEventKind::Moved => {
                // Cards off screen keep a stale area; never let them hover
                for (map, layout) in self.maps.iter_mut().zip(&layouts) {
                    if layout.is_some() {
                        map.handle_mouse(dataset, mouse);
                    } else {
                        map.clear_pointer();
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = hit(|l| l.preview) {
                    self.focus = idx;
                    self.pressed = Some(idx);
                    self.maps[idx].handle_mouse(dataset, mouse);
                } else if let Some(idx) = hit(|l| l.button) {
                    self.toggle(idx);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(idx) = self.pressed {
                    self.maps[idx].handle_mouse(dataset, mouse);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let idx = self.pressed.take()?;
                if self.maps[idx].is_dragging() {
                    self.maps[idx].handle_mouse(dataset, mouse);
                    return None;
                }
                // A motionless press and release opens the preset
                self.maps[idx].clear_pointer();
                if hit(|l| l.preview) == Some(idx) {
                    return Some(GalleryAction::Navigate(EXAMPLES[idx].route()));
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => match hit(|l| l.preview) {
                Some(idx) => {
                    self.maps[idx].handle_mouse(dataset, mouse);
                }
                None if mouse.kind == MouseEventKind::ScrollDown => {
                    let rows = EXAMPLES.len().div_ceil(columns_for(self.area.get().width));
                    self.first_row.set((self.first_row.get() + 1).min(rows - 1));
                }
                None => self.first_row.set(self.first_row.get().saturating_sub(1)),
            },
            _ => {}
        }
        None
    }

    pub fn widget<'a>(&'a self, dataset: &'a Dataset) -> GalleryView<'a> {
        GalleryView { gallery: self, dataset }
    }
}

pub struct GalleryView<'a> {
    gallery: &'a Gallery,
    dataset: &'a Dataset,
}

impl GalleryView<'_> {
    fn render_card(&self, idx: usize, layout: &CardLayout, buf: &mut Buffer) {
        let example = &EXAMPLES[idx];
        let focused = self.gallery.focus == idx;
        let border = if focused { ACCENT } else { Color::DarkGray };
        let open = self.gallery.expanded == Some(example.country);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        self.gallery.maps[idx]
            .widget(self.dataset)
            .block(block)
            .render(layout.preview, buf);

        Paragraph::new(Line::from(Span::styled(
            example.country,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout.title, buf);
        Paragraph::new(Line::from(Span::styled(
            example.description,
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center)
        .render(layout.description, buf);

        let chevron = if open { "▴" } else { "▾" };
        let width = layout.button.width as usize;
        let label = format!(" </> View Code{:>pad$} ", chevron, pad = width.saturating_sub(16).max(1));
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default().fg(Color::White).bg(Color::Rgb(31, 41, 55)),
        )))
        .render(layout.button, buf);

        if let Some(code_area) = layout.code {
            Paragraph::new(example.code)
                .style(Style::default().fg(Color::Gray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .render(code_area, buf);
        }
    }
}

impl Widget for GalleryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(BACKGROUND));
        let [header, grid] = Layout::vertical([Constraint::Length(HEADER_ROWS), Constraint::Min(0)]).areas(area);

        Paragraph::new(Line::from(Span::styled(
            " Example Maps",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .render(header, buf);

        self.gallery.area.set(grid);
        self.gallery.scroll_to_focus(grid);
        for (idx, layout) in self.gallery.layouts().iter().enumerate() {
            if let Some(layout) = layout {
                self.render_card(idx, layout, buf);
            }
        }
    }
}
