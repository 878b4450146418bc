//! Client-side state shared through Leptos context.
//!
//! DESIGN
//! ======
//! State types are plain structs wrapped in `RwSignal` by their owners, so the
//! transition rules stay testable without a reactive runtime.

pub mod auth;
pub mod payment;
pub mod remote;
