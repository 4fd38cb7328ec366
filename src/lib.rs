//! Terminal world map with a country selector widget and an example gallery.

pub mod app;
pub mod config;
pub mod country;
pub mod country_list;
pub mod data;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod map;
pub mod route;
pub mod store;
pub mod ui;
pub mod view;
pub mod widget;

pub use error::{MapError, Result};
