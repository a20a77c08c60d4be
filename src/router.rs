use std::path::Path;

use anyhow::{Context, Result};
use axum::{http::Method, routing::get, Router};
use tera::Tera;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{api, AppState};

pub fn load_templates(dir: &Path) -> Result<Tera> {
    let pattern = format!("{}/**/*.{{html,xml}}", dir.display());
    Tera::new(&pattern).with_context(|| format!("Failed to load templates from {}", dir.display()))
}

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(api::homepage))
        .route("/healthz", get(api::healthz))
        .route("/sitemap.xml", get(api::sitemap))
        .route("/robots.txt", get(api::robots_txt))
        .route("/{slug}", get(api::render_hyphenated_url))
        .nest_service("/static", static_files)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::HEAD]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
