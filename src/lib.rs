//! notebar library crate.
//!
//! This library provides the core functionality for notebar, including:
//! - Note model, category grouping and pinned-set persistence
//! - Note stores (JSON file, in-memory) and search
//! - The sidebar interaction controller
//! - Terminal UI components and the event loop

pub mod app;
pub mod config;
pub mod event_loop;
mod handlers;
pub mod logging;
pub mod note;
pub mod pins;
pub mod search;
pub mod sidebar;
pub mod store;
pub mod ui;
