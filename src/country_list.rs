//! Country list panel beside the main map.
//!
//! The list reads and writes the same shared store as the connected map, so
//! choosing a country here moves the map and clicking the map moves the
//! list's marker.

use crate::store::{StoreHandle, WriteOutcome};
use crate::widget::style::ACCENT;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::cell::Cell;
use tracing::trace;

const PAGE: usize = 10;

pub struct CountryList {
    names: Vec<String>,
    cursor: usize,
    store: StoreHandle,
    offset: Cell<usize>,
    /// Outer area of the last render
    area: Cell<Rect>,
}

impl CountryList {
    /// `names` are listed alphabetically, without duplicates.
    pub fn new(names: impl IntoIterator<Item = String>, store: StoreHandle) -> Self {
        let mut names: Vec<String> = names.into_iter().collect();
        names.sort();
        names.dedup();
        let mut list = Self {
            names,
            cursor: 0,
            store,
            offset: Cell::new(0),
            area: Cell::new(Rect::default()),
        };
        list.follow_selection();
        list
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn selected_index(&self) -> Option<usize> {
        let selected = self.store.snapshot().selected?;
        self.names.iter().position(|n| *n == selected)
    }

    /// Move the cursor onto the store's selection, if it is listed.
    pub fn follow_selection(&mut self) {
        if let Some(idx) = self.selected_index() {
            self.cursor = idx;
        }
    }

    /// Select the entry at `idx` through the store.
    pub fn select(&mut self, idx: usize) -> WriteOutcome {
        let Some(name) = self.names.get(idx) else {
            return WriteOutcome::Ignored;
        };
        self.cursor = idx;
        let outcome = self.store.select_country_by_name(name);
        trace!(name, ?outcome, "list selection");
        outcome
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.names.is_empty() {
            return;
        }
        let last = self.names.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-(PAGE as isize)),
            KeyCode::PageDown => self.move_cursor(PAGE as isize),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.names.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.select(self.cursor);
            }
            _ => return false,
        }
        true
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.get().contains(Position::new(column, row))
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !self.contains(mouse.column, mouse.row) {
            return false;
        }
        let inner = Block::default().borders(Borders::ALL).inner(self.area.get());
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if inner.contains(Position::new(mouse.column, mouse.row)) {
                    let idx = self.offset.get() + (mouse.row - inner.y) as usize;
                    self.select(idx);
                }
            }
            MouseEventKind::ScrollUp => self.move_cursor(-1),
            MouseEventKind::ScrollDown => self.move_cursor(1),
            _ => {}
        }
        true
    }

    /// Keep the cursor inside `rows` visible rows.
    fn scroll_for(&self, rows: usize) -> usize {
        let mut offset = self.offset.get();
        if self.cursor < offset {
            offset = self.cursor;
        } else if rows > 0 && self.cursor >= offset + rows {
            offset = self.cursor + 1 - rows;
        }
        self.offset.set(offset);
        offset
    }

    pub fn widget(&self, focused: bool) -> CountryListView<'_> {
        CountryListView { list: self, focused }
    }
}

pub struct CountryListView<'a> {
    list: &'a CountryList,
    focused: bool,
}

impl Widget for CountryListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let list = self.list;
        list.area.set(area);
        let border = if self.focused { ACCENT } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " Countries ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = inner.height as usize;
        let offset = list.scroll_for(rows);
        let selected = list.selected_index();

        let lines: Vec<Line> = list
            .names
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows)
            .map(|(idx, name)| {
                let is_selected = selected == Some(idx);
                let marker = if is_selected { "● " } else { "  " };
                let mut style = if is_selected {
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if self.focused && idx == list.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(Span::styled(format!("{marker}{name}"), style))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MapStore, SharedMapStore};
    use crate::view::MapViewState;
    use crossterm::event::KeyModifiers;

    fn names() -> Vec<String> {
        ["Japan", "Brazil", "Bolivia", "Japan"].map(String::from).to_vec()
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        let list = CountryList::new(names(), store);
        assert_eq!(list.names(), ["Bolivia", "Brazil", "Japan"]);
    }

    #[test]
    fn enter_selects_through_store() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        let mut list = CountryList::new(names(), store.clone());
        list.handle_key(KeyCode::End);
        list.handle_key(KeyCode::Enter);
        assert_eq!(store.snapshot().selected.as_deref(), Some("Japan"));
        // Bolivia has no camera preset but is drawable
        list.handle_key(KeyCode::Home);
        assert_eq!(list.select(0), WriteOutcome::Applied);
        assert_eq!(store.snapshot().selected.as_deref(), Some("Bolivia"));
    }

    #[test]
    fn cursor_follows_store_selection() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        let mut list = CountryList::new(names(), store.clone());
        store.select_country_by_name("Brazil");
        list.follow_selection();
        assert_eq!(list.cursor(), 1);
    }

    #[test]
    fn cursor_is_clamped() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        let mut list = CountryList::new(names(), store);
        list.handle_key(KeyCode::Up);
        assert_eq!(list.cursor(), 0);
        list.handle_key(KeyCode::PageDown);
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn click_selects_row() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        let list_store = store.clone();
        let mut list = CountryList::new(names(), list_store);
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        list.widget(true).render(area, &mut buf);

        let clicked = list.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        assert!(clicked);
        assert_eq!(store.snapshot().selected.as_deref(), Some("Brazil"));
    }

    #[test]
    fn render_marks_selection() {
        let store = SharedMapStore::new(MapViewState::default(), names());
        store.select_country_by_name("Japan");
        let list = CountryList::new(names(), store);
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        list.widget(false).render(area, &mut buf);
        assert_eq!(buf[(1, 3)].symbol(), "●");
        assert_eq!(buf[(1, 3)].fg, ACCENT);
    }
}
