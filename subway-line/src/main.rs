use subway_line::config::ServerConfig;
use subway_line::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("subway_line=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::from_env();
    let app = create_router(AppState::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "subway line service listening");
    info!("endpoints: GET /health, POST|GET|DELETE /lines/:line_id/sections, GET /lines/:line_id/stations");

    axum::serve(listener, app).await?;
    Ok(())
}
