//! Client-side behavior for the home care agency site.
//!
//! The page is an in-memory [`dom::Document`]; [`site::Site`] loads every
//! component against it and routes user events to them. Language switching
//! uses the built-in dictionary in [`i18n`], with an optional bridge to an
//! external translation widget in [`widget`].

pub mod back_to_top;
pub mod binder;
pub mod config;
pub mod contact;
pub mod context;
pub mod dom;
pub mod i18n;
pub mod locale;
pub mod logging;
pub mod menu;
pub mod poll;
pub mod preferences;
pub mod selector;
pub mod site;
pub mod storage;
pub mod theme;
pub mod transition;
pub mod widget;

pub use config::Config;
pub use site::{Site, SiteBuilder};
