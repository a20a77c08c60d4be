use crate::{
    error::OrderError,
    models::{PageDoc, SectionFields, SubtabDoc, TabDoc},
};

pub const TAB_ORDER: &str = "TabOrder";
pub const SUBTAB_ORDER: &str = "SubtabOrder";
pub const SECTION_ORDER: &str = "SectionOrder";

/// Absent or blank order values sort as `0`; anything else must be an integer.
pub fn parse_order(field: &'static str, raw: Option<&str>) -> Result<i64, OrderError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(0);
    };
    raw.parse::<i64>().map_err(|_| OrderError {
        field,
        value: raw.to_string(),
    })
}

pub fn sort_by_order<'a, T, F>(
    items: &'a [T],
    field: &'static str,
    order_of: F,
) -> Result<Vec<&'a T>, OrderError>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut keyed = items
        .iter()
        .map(|item| parse_order(field, order_of(item)).map(|order| (order, item)))
        .collect::<Result<Vec<_>, _>>()?;
    keyed.sort_by_key(|(order, _)| *order);
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

pub fn sort_tabs(tabs: &[TabDoc]) -> Result<Vec<&TabDoc>, OrderError> {
    sort_by_order(tabs, TAB_ORDER, |tab| tab.tab_fields.tab_order.as_deref())
}

pub fn sort_subtabs(subtabs: &[SubtabDoc]) -> Result<Vec<&SubtabDoc>, OrderError> {
    sort_by_order(subtabs, SUBTAB_ORDER, |subtab| {
        subtab.subtab_fields.subtab_order.as_deref()
    })
}

pub fn sort_sections(sections: &[SectionFields]) -> Result<Vec<&SectionFields>, OrderError> {
    sort_by_order(sections, SECTION_ORDER, |section| {
        section.section_order.as_deref()
    })
}

pub fn page_rank(page: &PageDoc) -> Result<i64, OrderError> {
    parse_order(
        TAB_ORDER,
        page.tabs
            .first()
            .and_then(|tab| tab.tab_fields.tab_order.as_deref()),
    )
}
