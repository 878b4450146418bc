//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render portal sections and dialogs, reading shared auth state
//! from Leptos context and talking to the backend through `state::remote`.

pub mod admin_documents;
pub mod admin_health;
pub mod admin_payments;
pub mod admin_plans;
pub mod admin_users;
pub mod alert;
pub mod claims_panel;
pub mod coverage_meter;
pub mod document_panel;
pub mod modal;
pub mod mpesa_payment;
pub mod nav_bar;
pub mod payment_history;
pub mod payment_schedule;
pub mod plan_card;
