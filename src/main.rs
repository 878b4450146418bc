#![recursion_limit = "256"]

mod config;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::PortalConfig::from_env().expect("invalid configuration");
    let bind_addr = config.bind_addr();
    let backend = config.backend_url.clone();

    let state = state::AppState::new(config).expect("http client init failed");
    let app = routes::app(state).expect("leptos configuration");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind");

    tracing::info!(addr = %bind_addr, %backend, "portal listening");
    axum::serve(listener, app).await.expect("server failed");
}
