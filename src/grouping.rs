use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{error::OrderError, models::SectionFields, ordering::sort_sections};

pub const ALL_YEARS: &str = "all";

#[derive(Debug, Clone, Serialize)]
pub struct YearGroups<'a> {
    pub years: Vec<String>,
    pub sections_by_year: BTreeMap<String, Vec<&'a SectionFields>>,
}

/// Groups a subtab's sections into year buckets. Sections are taken in
/// `SectionOrder`; a dated section lands only in its own year, an undated one
/// is repeated in every bucket.
pub fn group_sections_by_year(sections: &[SectionFields]) -> Result<YearGroups<'_>, OrderError> {
    let distinct: BTreeSet<&str> = sections.iter().filter_map(SectionFields::year).collect();
    let mut years: Vec<String> = distinct.into_iter().rev().map(str::to_string).collect();
    if years.is_empty() {
        years.push(ALL_YEARS.to_string());
    }

    let mut sections_by_year: BTreeMap<String, Vec<&SectionFields>> = years
        .iter()
        .map(|year| (year.clone(), Vec::new()))
        .collect();

    for section in sort_sections(sections)? {
        match section.year() {
            Some(year) => sections_by_year
                .entry(year.to_string())
                .or_default()
                .push(section),
            None => {
                for bucket in sections_by_year.values_mut() {
                    bucket.push(section);
                }
            }
        }
    }

    Ok(YearGroups {
        years,
        sections_by_year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, year: Option<&str>, order: &str) -> SectionFields {
        SectionFields {
            chart_title: title.to_string(),
            year: year.map(str::to_string),
            section_order: Some(order.to_string()),
            ..Default::default()
        }
    }

    fn titles(groups: &YearGroups<'_>, year: &str) -> Vec<String> {
        groups.sections_by_year[year]
            .iter()
            .map(|s| s.chart_title.clone())
            .collect()
    }

    #[test]
    fn years_sorted_descending_and_undated_sections_repeat() {
        let sections = vec![
            section("map-2016", Some("2016"), "3"),
            section("turnout", None, "1"),
            section("bar-2021", Some("2021"), "2"),
            section("map-2021", Some("2021"), "4"),
        ];
        let groups = group_sections_by_year(&sections).expect("groups");

        assert_eq!(groups.years, vec!["2021", "2016"]);
        assert_eq!(titles(&groups, "2021"), vec!["turnout", "bar-2021", "map-2021"]);
        assert_eq!(titles(&groups, "2016"), vec!["turnout", "map-2016"]);
    }

    #[test]
    fn undated_sections_fall_back_to_all_bucket() {
        let sections = vec![section("b", None, "2"), section("a", None, "")];
        let groups = group_sections_by_year(&sections).expect("groups");

        assert_eq!(groups.years, vec![ALL_YEARS]);
        assert_eq!(titles(&groups, ALL_YEARS), vec!["a", "b"]);
    }

    #[test]
    fn dated_sections_appear_in_exactly_one_bucket() {
        let sections = vec![
            section("x", Some("2011"), "1"),
            section("y", Some("2016"), "1"),
            section("z", Some("2011"), "1"),
        ];
        let groups = group_sections_by_year(&sections).expect("groups");
        let total: usize = groups.sections_by_year.values().map(Vec::len).sum();
        assert_eq!(total, sections.len());
    }

    #[test]
    fn non_numeric_section_order_is_an_error() {
        let sections = vec![section("x", None, "top")];
        assert!(group_sections_by_year(&sections).is_err());
    }

    #[test]
    fn empty_subtab_yields_empty_all_bucket() {
        let groups = group_sections_by_year(&[]).expect("groups");
        assert_eq!(groups.years, vec![ALL_YEARS]);
        assert!(groups.sections_by_year[ALL_YEARS].is_empty());
    }
}
