pub mod airtable;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grouping;
pub mod models;
pub mod ordering;
pub mod page;
pub mod router;
pub mod seo;
pub mod sitemap;
pub mod slug;
pub mod store;
pub mod transform;

use std::sync::Arc;

use config::Config;
use store::SiteSnapshot;
use tera::Tera;

pub use router::build_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub snapshot: Arc<SiteSnapshot>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(config: Config, snapshot: SiteSnapshot, templates: Tera) -> Self {
        Self {
            config,
            snapshot: Arc::new(snapshot),
            templates: Arc::new(templates),
        }
    }
}
