use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{
    models::{
        non_blank, PageDoc, SectionFields, SourceRecord, SourceTables, SubtabDoc, TabDoc,
    },
    seo::fill_seo_fields,
};

const RESULTS_MARKER: &str = "presidential election results";
const CANDIDATES_MARKER: &str = "presidential candidates";

fn lookup<F>(records: &[SourceRecord<F>]) -> HashMap<&str, &F> {
    records.iter().map(|r| (r.id.as_str(), &r.fields)).collect()
}

pub fn extract_country_data(tables: &SourceTables) -> BTreeMap<String, PageDoc> {
    let tab_lookup = lookup(&tables.tabs);
    let subtab_lookup = lookup(&tables.subtabs);
    let section_lookup = lookup(&tables.sections);

    let mut result = BTreeMap::new();

    for page in &tables.pages {
        let fields = &page.fields;
        if !fields.publish_status {
            continue;
        }
        let Some(page_id) = non_blank(fields.page_id.as_deref()) else {
            debug!(record = %page.id, "Dropping country page without PageID");
            continue;
        };
        let country = fields.country.as_deref().unwrap_or("");

        let mut tabs = Vec::new();
        for tab_id in &fields.tab_ids {
            let Some(tab_fields) = tab_lookup.get(tab_id.as_str()) else {
                continue;
            };
            if !tab_fields.publish_status {
                continue;
            }

            let mut subtabs = Vec::new();
            for subtab_id in &tab_fields.subtab_ids {
                let Some(subtab_fields) = subtab_lookup.get(subtab_id.as_str()) else {
                    continue;
                };
                if !subtab_fields.subtab_show {
                    continue;
                }

                let sections = subtab_fields
                    .section_ids
                    .iter()
                    .filter_map(|id| section_lookup.get(id.as_str()))
                    .filter(|section| section.is_shown())
                    .map(|section| {
                        let mut section = (*section).clone();
                        fill_seo_fields(&mut section, country);
                        section
                    })
                    .collect();

                subtabs.push(SubtabDoc {
                    subtab_fields: (*subtab_fields).clone(),
                    sections,
                });
            }

            merge_candidates_into_results(&mut subtabs);

            tabs.push(TabDoc {
                tab_fields: (*tab_fields).clone(),
                subtabs,
            });
        }

        debug!(page = %page_id, tabs = tabs.len(), "Extracted country page");
        result.insert(
            page_id.to_string(),
            PageDoc {
                page_fields: fields.clone(),
                tabs,
            },
        );
    }

    result
}

pub fn extract_democracy_data(tables: &SourceTables) -> BTreeMap<String, PageDoc> {
    let tab_lookup = lookup(&tables.tabs);
    let subtab_lookup = lookup(&tables.subtabs);
    let section_lookup = lookup(&tables.sections);

    let mut result = BTreeMap::new();

    for page in &tables.pages {
        let fields = &page.fields;
        let Some(page_id) = non_blank(fields.democracy_page_id.as_deref()) else {
            debug!(record = %page.id, "Dropping democracy page without Democracy-pageID");
            continue;
        };

        let tabs = fields
            .democracy_tab_ids
            .iter()
            .filter_map(|id| tab_lookup.get(id.as_str()))
            .map(|tab_fields| TabDoc {
                tab_fields: (*tab_fields).clone(),
                subtabs: tab_fields
                    .democracy_subtab_ids
                    .iter()
                    .filter_map(|id| subtab_lookup.get(id.as_str()))
                    .map(|subtab_fields| SubtabDoc {
                        subtab_fields: (*subtab_fields).clone(),
                        sections: subtab_fields
                            .democracy_section_ids
                            .iter()
                            .filter_map(|id| section_lookup.get(id.as_str()))
                            .map(|section| (*section).clone())
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        result.insert(
            page_id.to_string(),
            PageDoc {
                page_fields: fields.clone(),
                tabs,
            },
        );
    }

    result
}

/// Folds the candidates subtab's sections into the results subtab: undated
/// sections first, then each year newest first with candidates ahead of
/// results. The candidates subtab is kept with no sections. When several
/// subtabs match a marker the last one is used.
pub fn merge_candidates_into_results(subtabs: &mut [SubtabDoc]) {
    let title_has = |subtab: &SubtabDoc, marker: &str| subtab.title().to_lowercase().contains(marker);

    let Some(results_idx) = subtabs.iter().rposition(|s| title_has(s, RESULTS_MARKER)) else {
        return;
    };
    let Some(candidates_idx) = subtabs
        .iter()
        .rposition(|s| !title_has(s, RESULTS_MARKER) && title_has(s, CANDIDATES_MARKER))
    else {
        return;
    };

    let candidates = std::mem::take(&mut subtabs[candidates_idx].sections);
    let results = std::mem::take(&mut subtabs[results_idx].sections);
    subtabs[results_idx].sections = interleave_by_year(candidates, results);
}

fn interleave_by_year(
    candidates: Vec<SectionFields>,
    results: Vec<SectionFields>,
) -> Vec<SectionFields> {
    let mut undated_candidates = Vec::new();
    let mut undated_results = Vec::new();
    // year -> (candidate sections, result sections)
    let mut by_year: BTreeMap<String, (Vec<SectionFields>, Vec<SectionFields>)> = BTreeMap::new();

    for section in candidates {
        match section.year().map(str::to_string) {
            Some(year) => by_year.entry(year).or_default().0.push(section),
            None => undated_candidates.push(section),
        }
    }
    for section in results {
        match section.year().map(str::to_string) {
            Some(year) => by_year.entry(year).or_default().1.push(section),
            None => undated_results.push(section),
        }
    }

    let mut merged = undated_candidates;
    merged.extend(undated_results);
    for (_, (year_candidates, year_results)) in by_year.into_iter().rev() {
        merged.extend(year_candidates);
        merged.extend(year_results);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageFields, SubtabFields, TabFields};

    fn record<F>(id: &str, fields: F) -> SourceRecord<F> {
        SourceRecord {
            id: id.to_string(),
            fields,
        }
    }

    fn section(title: &str, year: Option<&str>) -> SectionFields {
        SectionFields {
            charttype: Some("bar".to_string()),
            year: year.map(str::to_string),
            show_section: Some("Yes".to_string()),
            chart_title: title.to_string(),
            ..Default::default()
        }
    }

    fn subtab(title: &str, section_ids: &[&str]) -> SubtabFields {
        SubtabFields {
            subtab_title: Some(title.to_string()),
            subtab_show: true,
            section_ids: section_ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn chart_titles(sections: &[SectionFields]) -> Vec<&str> {
        sections.iter().map(|s| s.chart_title.as_str()).collect()
    }

    fn election_tables() -> SourceTables {
        SourceTables {
            pages: vec![record(
                "recPage",
                PageFields {
                    page_id: Some("benin".to_string()),
                    country: Some("Benin".to_string()),
                    publish_status: true,
                    tab_ids: vec!["recTab".to_string(), "recMissing".to_string()],
                    ..Default::default()
                },
            )],
            tabs: vec![record(
                "recTab",
                TabFields {
                    tab_title: Some("Elections".to_string()),
                    publish_status: true,
                    subtab_ids: vec!["recCand".to_string(), "recRes".to_string()],
                    ..Default::default()
                },
            )],
            subtabs: vec![
                record("recCand", subtab("Presidential Candidates", &["c21", "c16"])),
                record("recRes", subtab("Presidential Election Results", &["r21", "rx"])),
            ],
            sections: vec![
                record("c21", section("candidate-2021", Some("2021"))),
                record("c16", section("candidate-2016", Some("2016"))),
                record("r21", section("result-2021", Some("2021"))),
                record("rx", section("no-year-result", None)),
            ],
        }
    }

    #[test]
    fn merges_candidates_into_results_chronologically() {
        let pages = extract_country_data(&election_tables());
        let page = pages.get("benin").expect("benin page");
        assert_eq!(page.tabs.len(), 1);

        let subtabs = &page.tabs[0].subtabs;
        assert_eq!(subtabs.len(), 2);
        assert!(subtabs[0].sections.is_empty());
        assert_eq!(
            chart_titles(&subtabs[1].sections),
            vec!["no-year-result", "candidate-2021", "result-2021", "candidate-2016"]
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let mut pages = extract_country_data(&election_tables());
        let subtabs = &mut pages.get_mut("benin").expect("page").tabs[0].subtabs;
        let before = subtabs.clone();
        merge_candidates_into_results(subtabs);
        assert_eq!(*subtabs, before);
    }

    #[test]
    fn merge_requires_both_subtabs() {
        let mut subtabs = vec![SubtabDoc {
            subtab_fields: subtab("Presidential Election Results", &[]),
            sections: vec![section("b", Some("2016")), section("a", Some("2021"))],
        }];
        merge_candidates_into_results(&mut subtabs);
        assert_eq!(chart_titles(&subtabs[0].sections), vec!["b", "a"]);
    }

    #[test]
    fn last_matching_subtab_takes_the_merge() {
        let mut subtabs = vec![
            SubtabDoc {
                subtab_fields: subtab("Presidential Election Results 2016", &[]),
                sections: vec![section("early-result", Some("2016"))],
            },
            SubtabDoc {
                subtab_fields: subtab("Presidential Candidates", &[]),
                sections: vec![section("candidate-2021", Some("2021"))],
            },
            SubtabDoc {
                subtab_fields: subtab("Presidential Election Results", &[]),
                sections: vec![section("result-2021", Some("2021"))],
            },
        ];

        merge_candidates_into_results(&mut subtabs);
        assert_eq!(chart_titles(&subtabs[0].sections), vec!["early-result"]);
        assert!(subtabs[1].sections.is_empty());
        assert_eq!(
            chart_titles(&subtabs[2].sections),
            vec!["candidate-2021", "result-2021"]
        );
    }

    #[test]
    fn hidden_sections_and_unpublished_entities_are_dropped() {
        let mut tables = election_tables();
        tables.sections[2].fields.show_section = Some("No".to_string());
        tables.pages.push(record(
            "recDraft",
            PageFields {
                page_id: Some("togo".to_string()),
                publish_status: false,
                ..Default::default()
            },
        ));
        tables.pages.push(record(
            "recNoKey",
            PageFields {
                publish_status: true,
                ..Default::default()
            },
        ));

        let pages = extract_country_data(&tables);
        assert_eq!(pages.keys().collect::<Vec<_>>(), vec!["benin"]);
        let sections = &pages["benin"].tabs[0].subtabs[1].sections;
        assert!(!chart_titles(sections).contains(&"result-2021"));
    }

    #[test]
    fn country_sections_get_seo_fill_in() {
        let pages = extract_country_data(&election_tables());
        let merged = &pages["benin"].tabs[0].subtabs[1].sections;
        assert_eq!(
            merged[1].seo_title.as_deref(),
            Some("Benin 2021 total result bar chart")
        );
    }

    #[test]
    fn democracy_extraction_is_unfiltered() {
        let tables = SourceTables {
            pages: vec![
                record(
                    "recPage",
                    PageFields {
                        democracy_page_id: Some("upcoming-elections".to_string()),
                        democracy_tab_ids: vec!["recTab".to_string(), "recGone".to_string()],
                        ..Default::default()
                    },
                ),
                record("recBlank", PageFields::default()),
            ],
            tabs: vec![record(
                "recTab",
                TabFields {
                    democracy_tab: Some("Upcoming".to_string()),
                    democracy_subtab_ids: vec!["recSub".to_string()],
                    ..Default::default()
                },
            )],
            subtabs: vec![record(
                "recSub",
                SubtabFields {
                    democracy_section_ids: vec!["recSec".to_string()],
                    ..Default::default()
                },
            )],
            sections: vec![record(
                "recSec",
                SectionFields {
                    charttype: Some("map".to_string()),
                    show_section: Some("No".to_string()),
                    ..Default::default()
                },
            )],
        };

        let pages = extract_democracy_data(&tables);
        assert_eq!(pages.len(), 1);
        let page = &pages["upcoming-elections"];
        assert_eq!(page.tabs.len(), 1);
        let section = &page.tabs[0].subtabs[0].sections[0];
        assert_eq!(section.seo_title, None);
        assert_eq!(section.chart_title, "");
    }
}
