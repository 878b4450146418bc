//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns bearer auth, refresh and error normalization, `api` maps
//! endpoints onto typed calls, `payment_poller` drives the M-Pesa status loop,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod error;
pub mod http;
pub mod payment_poller;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
