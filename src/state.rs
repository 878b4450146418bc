//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no domain data: it holds the parsed config and one pooled
//! `reqwest::Client` used by the `/api` proxy.

use std::sync::Arc;

use crate::config::PortalConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PortalConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: PortalConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
