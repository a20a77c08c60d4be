use serde::Serialize;

use crate::{
    error::OrderError,
    models::{non_blank, PageDoc, SiteDocument},
    ordering::page_rank,
};

pub const ELECTION_TRACKER: &str = "Election Tracker";
pub const DEMOCRACY_DATA: &str = "Democracy Data";
pub const DIRECTORY: &str = "Directory of Country Resources";

type CategorySource = fn(&PageDoc) -> Option<&str>;

fn page_category(page: &PageDoc) -> Option<&str> {
    page.page_fields.category.as_deref()
}

fn first_tab_category(page: &PageDoc) -> Option<&str> {
    page.tabs.first()?.tab_fields.category.as_deref()
}

pub const CATEGORY_SOURCES: &[CategorySource] = &[page_category, first_tab_category];

pub fn resolve_category(page: &PageDoc) -> Option<&str> {
    CATEGORY_SOURCES
        .iter()
        .find_map(|source| non_blank(source(page)))
        .map(str::trim)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry<'a> {
    pub slug: &'a str,
    pub title: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Sidebar<'a> {
    pub tracker: Vec<SidebarEntry<'a>>,
    pub democracy: Vec<SidebarEntry<'a>>,
    pub countries: Vec<SidebarEntry<'a>>,
    pub directory: Vec<SidebarEntry<'a>>,
}

impl<'a> Sidebar<'a> {
    // Democracy pages outside the three known categories are left out.
    pub fn build(doc: &'a SiteDocument) -> Result<Self, OrderError> {
        let mut tracker = Vec::new();
        let mut democracy = Vec::new();
        let mut directory = Vec::new();

        for (key, page) in &doc.democracy {
            let bucket = match resolve_category(page) {
                Some(ELECTION_TRACKER) => &mut tracker,
                Some(DEMOCRACY_DATA) => &mut democracy,
                Some(DIRECTORY) => &mut directory,
                _ => continue,
            };
            bucket.push((page_rank(page)?, democracy_entry(key, page)));
        }

        let mut countries: Vec<SidebarEntry<'a>> = doc
            .countries
            .iter()
            .map(|(key, page)| SidebarEntry {
                slug: key,
                title: page.page_fields.country.as_deref().unwrap_or(""),
            })
            .collect();
        countries.sort_by_cached_key(|entry| entry.title.to_lowercase());

        Ok(Self {
            tracker: ranked(tracker),
            democracy: ranked(democracy),
            countries,
            directory: ranked(directory),
        })
    }

    pub fn category_pages(&self, category: &str) -> Option<&[SidebarEntry<'a>]> {
        match category {
            ELECTION_TRACKER => Some(&self.tracker),
            DEMOCRACY_DATA => Some(&self.democracy),
            _ => None,
        }
    }
}

fn democracy_entry<'a>(key: &'a str, page: &'a PageDoc) -> SidebarEntry<'a> {
    SidebarEntry {
        slug: key,
        title: page.page_fields.democracy_title.as_deref().unwrap_or(""),
    }
}

fn ranked(mut entries: Vec<(i64, SidebarEntry<'_>)>) -> Vec<SidebarEntry<'_>> {
    entries.sort_by_key(|(rank, _)| *rank);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageFields, TabDoc, TabFields};

    fn democracy_page(
        title: &str,
        category: Option<&str>,
        tab_category: Option<&str>,
        order: &str,
    ) -> PageDoc {
        PageDoc {
            page_fields: PageFields {
                democracy_title: Some(title.to_string()),
                category: category.map(str::to_string),
                ..Default::default()
            },
            tabs: vec![TabDoc {
                tab_fields: TabFields {
                    tab_order: Some(order.to_string()),
                    category: tab_category.map(str::to_string),
                    ..Default::default()
                },
                subtabs: Vec::new(),
            }],
        }
    }

    fn country_page(name: &str) -> PageDoc {
        PageDoc {
            page_fields: PageFields {
                country: Some(name.to_string()),
                ..Default::default()
            },
            tabs: Vec::new(),
        }
    }

    #[test]
    fn category_prefers_page_then_first_tab() {
        let page = democracy_page("A", Some(" Democracy Data "), Some(ELECTION_TRACKER), "1");
        assert_eq!(resolve_category(&page), Some(DEMOCRACY_DATA));

        let page = democracy_page("A", Some("  "), Some(ELECTION_TRACKER), "1");
        assert_eq!(resolve_category(&page), Some(ELECTION_TRACKER));

        let page = country_page("Kenya");
        assert_eq!(resolve_category(&page), None);
    }

    #[test]
    fn sidebar_groups_and_orders_pages() {
        let mut doc = SiteDocument::default();
        doc.democracy.insert(
            "past-elections".to_string(),
            democracy_page("Past", None, Some(ELECTION_TRACKER), "2"),
        );
        doc.democracy.insert(
            "upcoming-elections".to_string(),
            democracy_page("Upcoming", Some(ELECTION_TRACKER), None, "1"),
        );
        doc.democracy.insert(
            "resources".to_string(),
            democracy_page("Resources", Some(DIRECTORY), None, "1"),
        );
        doc.democracy.insert(
            "misc".to_string(),
            democracy_page("Misc", Some("Archive"), None, "1"),
        );
        doc.countries.insert("zambia".to_string(), country_page("Zambia"));
        doc.countries.insert("benin".to_string(), country_page("benin"));
        doc.countries.insert("angola".to_string(), country_page("Angola"));

        let sidebar = Sidebar::build(&doc).expect("sidebar");
        let slugs = |entries: &[SidebarEntry]| {
            entries.iter().map(|e| e.slug.to_string()).collect::<Vec<_>>()
        };

        assert_eq!(slugs(&sidebar.tracker), vec!["upcoming-elections", "past-elections"]);
        assert_eq!(slugs(&sidebar.directory), vec!["resources"]);
        assert!(sidebar.democracy.is_empty());
        assert_eq!(slugs(&sidebar.countries), vec!["angola", "benin", "zambia"]);
        assert_eq!(sidebar.category_pages(ELECTION_TRACKER).map(<[_]>::len), Some(2));
        assert!(sidebar.category_pages(DIRECTORY).is_none());
    }

    #[test]
    fn sidebar_rejects_bad_tab_order() {
        let mut doc = SiteDocument::default();
        doc.democracy.insert(
            "upcoming".to_string(),
            democracy_page("Upcoming", Some(ELECTION_TRACKER), None, "soon"),
        );
        assert!(Sidebar::build(&doc).is_err());
    }
}
