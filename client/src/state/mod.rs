//! Reactive application state shared through Leptos context.
//!
//! Each struct is held in an `RwSignal` provided by `App`. Pages keep their
//! own feature state (`panels::*`) locally; only cross-page facts live here.

pub mod auth;
pub mod ui;
