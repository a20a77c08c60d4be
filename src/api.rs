use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tera::{Context as TeraContext, Tera};
use tokio::fs;
use tracing::{debug, warn};

use crate::{
    error::PageError,
    page::{assemble_home_page, assemble_simple_page, assemble_tab_page, HomePage, SimplePage},
    sitemap::render_sitemap,
    slug::resolve_slug,
    AppState,
};

fn render<C: Serialize>(templates: &Tera, name: &str, context: &C) -> Result<Response, PageError> {
    let context = TeraContext::from_serialize(context)?;
    Ok(Html(templates.render(name, &context)?).into_response())
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let doc = state.snapshot.document();
    Json(json!({
        "ok": true,
        "timestamp": Utc::now(),
        "loadedAt": state.snapshot.loaded_at(),
        "countries": doc.countries.len(),
        "democracy": doc.democracy.len(),
    }))
}

pub async fn homepage(State(state): State<AppState>) -> Result<Response, PageError> {
    match assemble_home_page(state.snapshot.document(), Utc::now())? {
        HomePage::Redirect(url) => Ok(Redirect::temporary(&url).into_response()),
        HomePage::Render(context) => render(&state.templates, "base.html", &context),
    }
}

pub async fn render_hyphenated_url(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, PageError> {
    let doc = state.snapshot.document();
    let Some(matched) = resolve_slug(&segment, |key| doc.contains_page(key)) else {
        debug!(segment = %segment, "No page matches request path");
        return Err(PageError::NotFound);
    };

    let now = Utc::now();
    if matched.page_key == segment {
        return match assemble_simple_page(doc, &matched.page_key, now)? {
            SimplePage::Redirect(url) => Ok(Redirect::temporary(&url).into_response()),
            SimplePage::Render(context) => render(&state.templates, "tab_page.html", &context),
        };
    }

    let context = assemble_tab_page(
        doc,
        &matched.page_key,
        matched.tab_slug.as_deref(),
        matched.year.as_deref(),
        now,
    )?;
    render(&state.templates, "tab_page.html", &context)
}

pub async fn sitemap(State(state): State<AppState>) -> Result<Response, PageError> {
    let xml = render_sitemap(
        &state.templates,
        state.snapshot.document(),
        &state.config.base_url,
    )?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

pub async fn robots_txt(State(state): State<AppState>) -> Response {
    let path = state.config.static_dir.join("robots.txt");
    match fs::read_to_string(&path).await {
        Ok(content) => ([(header::CONTENT_TYPE, "text/plain")], content).into_response(),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed reading {}: {err}", path.display());
            }
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
