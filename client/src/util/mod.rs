//! Browser adapters and helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic. Each adapter implements one `session` trait and degrades to an inert
//! fallback outside the `csr` build.

pub mod dark_mode;
pub mod download;
pub mod format;
pub mod navigation;
pub mod shortcuts;
pub mod storage;
pub mod timer;
