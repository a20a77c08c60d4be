use std::collections::BTreeSet;

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::{
    error::{OrderError, PageError},
    models::SiteDocument,
    ordering::sort_tabs,
    slug::tab_slug,
};

pub const SITEMAP_TEMPLATE: &str = "sitemap.xml";

#[derive(Debug, Serialize)]
struct SitemapContext<'a> {
    base_url: &'a str,
    paths: Vec<String>,
}

pub fn site_paths(doc: &SiteDocument) -> Result<Vec<String>, OrderError> {
    let keys: BTreeSet<&str> = doc
        .countries
        .keys()
        .chain(doc.democracy.keys())
        .map(String::as_str)
        .collect();

    let mut paths = vec!["/".to_string()];
    for key in keys {
        let Some(page) = doc.page(key) else {
            continue;
        };
        if page.tabs.len() > 1 {
            for tab in sort_tabs(&page.tabs)? {
                paths.push(format!("/{key}-{}", tab_slug(tab.tab_fields.title())));
            }
        } else {
            paths.push(format!("/{key}"));
        }
    }
    Ok(paths)
}

pub fn render_sitemap(
    templates: &Tera,
    doc: &SiteDocument,
    base_url: &str,
) -> Result<String, PageError> {
    let context = SitemapContext {
        base_url,
        paths: site_paths(doc)?,
    };
    let context = TeraContext::from_serialize(&context)?;
    Ok(templates.render(SITEMAP_TEMPLATE, &context)?)
}
