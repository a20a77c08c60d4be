use anyhow::Result;
use election_pages::{
    build_router, config::Config, router::load_templates, store::load_snapshot, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "election_pages=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();
    let snapshot = load_snapshot(&config.data_path).await;
    let templates = load_templates(&config.template_dir)?;

    let state = AppState::new(config.clone(), snapshot, templates);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("election-pages listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
