use agenda_mock::{DEFAULT_JWT_SECRET, MockState};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_mock=info,tower_http=info".into()),
        )
        .init();

    let port = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let secret =
        std::env::var("MOCK_JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());

    let state = MockState::with_secret(&secret);
    let app = Router::new()
        .nest("/api", state.router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Agenda Livre mock API listening on http://{}/api", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
