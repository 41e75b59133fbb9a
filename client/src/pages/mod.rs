//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page runs its session guard entry point on mount, owns its network
//! calls, and delegates rendering details to `components`.

pub mod dashboard;
pub mod login;
