use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be an integer, found {value:?}")]
pub struct OrderError {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,
    #[error("tab not found")]
    TabNotFound,
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("failed to render template: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Html("Page not found")).into_response(),
            Self::TabNotFound => (StatusCode::NOT_FOUND, Html("Tab not found")).into_response(),
            Self::Order(err) => {
                error!("Failed ordering page content: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("Page content is misconfigured"),
                )
                    .into_response()
            }
            Self::Render(err) => {
                error!("Template rendering failed: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("Failed to render page"),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Missing API credentials: set {0}")]
    MissingCredentials(&'static str),
}
