//! Desktop launcher-menu plugin for browsing Product Hunt posts.
//!
//! One run fetches today's and yesterday's ranked posts and renders them as
//! menu items; selecting a post yields a five-row detail view. The binary in
//! `main.rs` wires the production collaborators; everything behavioral lives
//! here behind traits so it can be driven by tests.

pub mod app;
pub mod error;
pub mod host;
pub mod items;
pub mod locale;
pub mod ph;
pub mod prefs;
pub mod reldate;
pub mod time;
