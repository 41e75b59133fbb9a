//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the `session` backend contracts over `fetch`; the wire
//! DTOs themselves live in `session::types`.

pub mod api;
