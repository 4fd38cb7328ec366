use crate::config::Config;
use crate::country_list::CountryList;
use crate::data::Dataset;
use crate::gallery::{Gallery, GalleryAction};
use crate::route::Route;
use crate::store::{MapStore, SharedMapStore, StoreHandle};
use crate::view::MapViewState;
use crate::widget::WorldMap;
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use std::rc::Rc;
use tracing::{debug, info};

/// Which Root page panel receives the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Map,
    List,
}

/// Application state
pub struct App {
    pub should_quit: bool,
    dataset: Dataset,
    store: Rc<SharedMapStore>,
    route: Route,
    map: WorldMap,
    list: CountryList,
    gallery: Gallery,
    focus: Focus,
    seen_revision: u64,
}

impl App {
    pub fn new(config: &Config, dataset: Dataset) -> Self {
        let names: Vec<String> = dataset.regions().iter().map(|r| r.name.clone()).collect();
        let store = SharedMapStore::new(
            MapViewState::with_show_unselected(config.settings.show_unselected),
            names.iter().cloned(),
        );
        let handle: StoreHandle = store.clone();
        let map = WorldMap::new(config.map.clone(), Some(handle.clone()), &dataset);
        let list = CountryList::new(names, handle);
        let gallery = Gallery::new(&dataset);

        let mut app = Self {
            should_quit: false,
            dataset,
            store,
            route: Route::default(),
            map,
            list,
            gallery,
            focus: Focus::Map,
            seen_revision: 0,
        };
        app.navigate(config.start.clone());
        app
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn list(&self) -> &CountryList {
        &self.list
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn store(&self) -> &SharedMapStore {
        &self.store
    }

    /// Switch pages. Landing on Root with a country selects it in the store.
    pub fn navigate(&mut self, route: Route) {
        info!(route = %route, "navigate");
        if let Route::Root {
            country: Some(country),
        } = &route
        {
            let outcome = self.store.select_country_by_name(country);
            debug!(country, ?outcome, "landing selection");
        }
        self.map.clear_pointer();
        self.route = route;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Drive deferred work. Returns true when something needs a redraw.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.map.poll();
        changed |= self.gallery.poll();
        let revision = self.store.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.list.follow_selection();
            changed = true;
        }
        changed
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return self.quit(),
            KeyCode::Char('g') => {
                let next = match self.route {
                    Route::Examples => Route::default(),
                    Route::Root { .. } => Route::Examples,
                };
                return self.navigate(next);
            }
            _ => {}
        }

        match self.route {
            Route::Examples => {
                if let Some(GalleryAction::Navigate(route)) = self.gallery.handle_key(code) {
                    self.navigate(route);
                }
            }
            Route::Root { .. } => {
                if code == KeyCode::Tab {
                    self.focus = match self.focus {
                        Focus::Map => Focus::List,
                        Focus::List => Focus::Map,
                    };
                    return;
                }
                let handled = match self.focus {
                    Focus::List => self.list.handle_key(code),
                    Focus::Map => false,
                };
                if !handled {
                    self.map.handle_key(code);
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match self.route {
            Route::Examples => {
                if let Some(GalleryAction::Navigate(route)) = self.gallery.handle_mouse(&self.dataset, mouse) {
                    self.navigate(route);
                }
            }
            Route::Root { .. } => {
                if self.list.handle_mouse(mouse) {
                    self.focus = Focus::List;
                }
                if self.map.handle_mouse(&self.dataset, mouse) && mouse.kind != MouseEventKind::Moved {
                    self.focus = Focus::Map;
                }
            }
        }
    }

    /// Selected country name for the status bar.
    pub fn selection_label(&self) -> String {
        self.map.view().selected.unwrap_or_else(|| "none".to_string())
    }
}
