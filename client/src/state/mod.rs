//! Reactive client state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` bundles the guard and REST client for the current page load;
//! the remaining modules are plain data held in `RwSignal`s.

pub mod auth;
pub mod expenses;
pub mod session;
pub mod toast;
pub mod ui;
