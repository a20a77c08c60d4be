use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::{
    catalog::{resolve_category, Sidebar, DEMOCRACY_DATA, DIRECTORY, ELECTION_TRACKER},
    error::PageError,
    grouping::group_sections_by_year,
    models::{non_blank, PageDoc, SectionFields, SiteDocument, TabDoc},
    ordering::{sort_subtabs, sort_tabs},
    slug::tab_slug,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabLink {
    pub title: String,
    pub url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubtabView<'a> {
    pub title: Option<&'a str>,
    pub text: Option<&'a str>,
    pub years: Vec<String>,
    pub sections_by_year: BTreeMap<String, Vec<&'a SectionFields>>,
    pub democracy_description: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentTab<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub more_info: String,
    pub subtabs: Vec<SubtabView<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabPageContext<'a> {
    pub page_title: String,
    pub country_description: Option<&'a str>,
    pub current_tab: CurrentTab<'a>,
    pub tab_links: Vec<TabLink>,
    pub category: Option<&'a str>,
    pub current_slug: &'a str,
    pub current_tab_slug: Option<&'a str>,
    pub selected_year: Option<&'a str>,
    pub sidebar: Sidebar<'a>,
    pub year: i32,
    pub version: i64,
    pub is_country_page: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeContext<'a> {
    pub sidebar: Sidebar<'a>,
    pub year: i32,
}

#[derive(Debug)]
pub enum SimplePage<'a> {
    Redirect(String),
    Render(Box<TabPageContext<'a>>),
}

#[derive(Debug)]
pub enum HomePage<'a> {
    Redirect(String),
    Render(HomeContext<'a>),
}

pub fn assemble_home_page(
    doc: &SiteDocument,
    now: DateTime<Utc>,
) -> Result<HomePage<'_>, PageError> {
    let sidebar = Sidebar::build(doc)?;
    if let Some(first) = sidebar.tracker.first() {
        return Ok(HomePage::Redirect(format!("/{}", first.slug)));
    }
    Ok(HomePage::Render(HomeContext {
        sidebar,
        year: now.year(),
    }))
}

pub fn assemble_simple_page<'a>(
    doc: &'a SiteDocument,
    slug: &'a str,
    now: DateTime<Utc>,
) -> Result<SimplePage<'a>, PageError> {
    let source = doc.page(slug).ok_or(PageError::NotFound)?;

    if source.tabs.len() > 1 {
        let sorted = sort_tabs(&source.tabs)?;
        if let Some(first) = sorted.first() {
            let first_slug = tab_slug(first.tab_fields.title());
            return Ok(SimplePage::Redirect(format!("/{slug}-{first_slug}")));
        }
    }

    assemble_tab_page(doc, slug, None, None, now).map(|ctx| SimplePage::Render(Box::new(ctx)))
}

pub fn page_title(source: &PageDoc, category: Option<&str>, slug: &str) -> String {
    if let Some(country) = non_blank(source.page_fields.country.as_deref()) {
        return format!("Democracy in {country}");
    }
    match category {
        Some(ELECTION_TRACKER) => "African Election Tracker".to_string(),
        Some(DEMOCRACY_DATA) => "African Democracy Data".to_string(),
        Some(DIRECTORY) => "Directory".to_string(),
        _ => non_blank(source.page_fields.democracy_title.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| capitalize(&slug.replace('-', " "))),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn context_more_info(country: &str) -> String {
    format!(
        "This page offers a comprehensive overview of {country}'s government and political history \
         through two key interactive visualisations. The first section provides a detailed table showcasing \
         vital political and economic indicators, such as {country}'s population, GDP, government \
         structure, age and tenure of the current president, military regime status, and democracy metrics. <br><br>\
         The second section presents a historical and political chronology of {country}, highlighting \
         significant milestones such as independence, referendum history, coups, notable wars, and \
         democratic progress. Together, these visualisations provide a rich resource for understanding \
         {country}'s governance, leadership, and democratic evolution, catering to researchers, \
         policymakers, and anyone interested in African political history."
    )
}

fn is_active_tab(index: usize, derived: &str, requested: Option<&str>) -> bool {
    match requested {
        Some(requested) => requested == derived,
        None => index == 0,
    }
}

fn tab_links(
    sidebar: &Sidebar<'_>,
    category: Option<&str>,
    slug: &str,
    sorted_tabs: &[&TabDoc],
    requested_tab: Option<&str>,
) -> Vec<TabLink> {
    if let Some(siblings) = category.and_then(|c| sidebar.category_pages(c)) {
        return siblings
            .iter()
            .map(|entry| TabLink {
                title: entry.title.to_string(),
                url: format!("/{}", entry.slug),
                is_active: entry.slug == slug,
            })
            .collect();
    }

    let multi_tab = sorted_tabs.len() > 1;
    sorted_tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let title = tab.tab_fields.title();
            let derived = tab_slug(title);
            let url = if multi_tab {
                format!("/{slug}-{derived}")
            } else {
                format!("/{slug}")
            };
            TabLink {
                title: title.to_string(),
                url,
                is_active: is_active_tab(index, &derived, requested_tab),
            }
        })
        .collect()
}

pub fn assemble_tab_page<'a>(
    doc: &'a SiteDocument,
    slug: &'a str,
    tab_slug_requested: Option<&'a str>,
    year: Option<&'a str>,
    now: DateTime<Utc>,
) -> Result<TabPageContext<'a>, PageError> {
    let source = doc.page(slug).ok_or(PageError::NotFound)?;
    let sidebar = Sidebar::build(doc)?;

    let category = resolve_category(source);
    let country = non_blank(source.page_fields.country.as_deref());
    let is_country_page = country.is_some() && category.is_none();

    let sorted_tabs = sort_tabs(&source.tabs)?;
    let links = tab_links(&sidebar, category, slug, &sorted_tabs, tab_slug_requested);

    let current = sorted_tabs
        .iter()
        .enumerate()
        .filter(|(index, tab)| {
            is_active_tab(*index, &tab_slug(tab.tab_fields.title()), tab_slug_requested)
        })
        .map(|(_, tab)| *tab)
        .last()
        .ok_or(PageError::TabNotFound)?;

    let tab_fields = &current.tab_fields;
    let tab_title = tab_fields.title();
    let mut more_info = tab_fields.more_info.clone().unwrap_or_default();
    if is_country_page && more_info.trim().is_empty() && tab_title == "Context" {
        more_info = context_more_info(country.unwrap_or_default());
    }

    let subtabs = sort_subtabs(&current.subtabs)?
        .into_iter()
        .map(|subtab| {
            let groups = group_sections_by_year(&subtab.sections)?;
            Ok::<_, PageError>(SubtabView {
                title: subtab.subtab_fields.subtab_title.as_deref(),
                text: subtab.subtab_fields.subtab_text.as_deref(),
                years: groups.years,
                sections_by_year: groups.sections_by_year,
                democracy_description: subtab.subtab_fields.description.as_deref(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TabPageContext {
        page_title: page_title(source, category, slug),
        country_description: source.page_fields.text.as_deref(),
        current_tab: CurrentTab {
            title: tab_title,
            text: tab_fields.tab_text.as_deref().unwrap_or(""),
            more_info,
            subtabs,
        },
        tab_links: links,
        category,
        current_slug: slug,
        current_tab_slug: tab_slug_requested,
        selected_year: year,
        sidebar,
        year: now.year(),
        version: now.timestamp(),
        is_country_page,
    })
}
