//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (guards, fetch-on-mount) and
//! delegates rendering details to `components`.

pub mod admin;
pub mod dashboard;
pub mod login;
pub mod plans;
pub mod register;
