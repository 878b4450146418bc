//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, downloads)
//! and pure formatting/validation rules from page and component logic to
//! improve reuse and testability.

pub mod auth;
pub mod csv;
pub mod format;
pub mod schedule;
pub mod storage;
pub mod validation;
