use std::net::SocketAddr;

use rail_server::store::MemoryStore;
use rail_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Bind address, overridable via environment
    let addr: SocketAddr = std::env::var("RAIL_SERVER_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    let state = AppState::new(MemoryStore::new());
    let app = create_router(state);

    println!("Rail network directory listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                        - Health check");
    println!("  GET    /api/stations                  - List stations");
    println!("  POST   /api/stations                  - Create a station");
    println!("  GET    /api/stations/:id/statistics   - Per-station statistics");
    println!("  GET    /api/stations/statistics       - Global statistics");
    println!("  GET    /api/trains                    - List trains");
    println!("  GET    /api/trains/search             - Advanced train search");
    println!("  GET    /api/trains/:id/duration       - Trip duration");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
