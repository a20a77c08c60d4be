use std::collections::BTreeMap;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::seo::parse_seo_keywords;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord<F> {
    pub id: String,
    pub fields: F,
}

#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub pages: Vec<SourceRecord<PageFields>>,
    pub tabs: Vec<SourceRecord<TabFields>>,
    pub subtabs: Vec<SourceRecord<SubtabFields>>,
    pub sections: Vec<SourceRecord<SectionFields>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFields {
    #[serde(rename = "PageID", default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(
        rename = "Democracy-pageID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub democracy_page_id: Option<String>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        rename = "Democracy-page",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub democracy_title: Option<String>,
    #[serde(
        rename = "PublishStatus",
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "is_false"
    )]
    pub publish_status: bool,
    #[serde(rename = "TabID", default, skip_serializing_if = "Vec::is_empty")]
    pub tab_ids: Vec<String>,
    #[serde(
        rename = "Democracy-tabID",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub democracy_tab_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabFields {
    #[serde(rename = "TabTitle", default, skip_serializing_if = "Option::is_none")]
    pub tab_title: Option<String>,
    #[serde(
        rename = "Democracy-tab",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub democracy_tab: Option<String>,
    #[serde(
        rename = "TabOrder",
        default,
        deserialize_with = "deserialize_loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tab_order: Option<String>,
    #[serde(
        rename = "PublishStatus",
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "is_false"
    )]
    pub publish_status: bool,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "TabText", default, skip_serializing_if = "Option::is_none")]
    pub tab_text: Option<String>,
    #[serde(
        rename = "More info about this page",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub more_info: Option<String>,
    #[serde(rename = "SubtabID", default, skip_serializing_if = "Vec::is_empty")]
    pub subtab_ids: Vec<String>,
    #[serde(
        rename = "Democracy-subtabID",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub democracy_subtab_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TabFields {
    pub fn title(&self) -> &str {
        non_blank(self.tab_title.as_deref())
            .or(self.democracy_tab.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtabFields {
    #[serde(
        rename = "SubtabTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subtab_title: Option<String>,
    #[serde(
        rename = "SubtabOrder",
        default,
        deserialize_with = "deserialize_loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtab_order: Option<String>,
    #[serde(
        rename = "SubtabShow",
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "is_false"
    )]
    pub subtab_show: bool,
    #[serde(rename = "SubtabText", default, skip_serializing_if = "Option::is_none")]
    pub subtab_text: Option<String>,
    #[serde(
        rename = "Description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "SectionID", default, skip_serializing_if = "Vec::is_empty")]
    pub section_ids: Vec<String>,
    #[serde(
        rename = "Democracy-sectionID",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub democracy_section_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionFields {
    #[serde(rename = "Charttype", default, skip_serializing_if = "Option::is_none")]
    pub charttype: Option<String>,
    #[serde(
        rename = "Year",
        default,
        deserialize_with = "deserialize_loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,
    #[serde(
        rename = "SectionOrder",
        default,
        deserialize_with = "deserialize_loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_order: Option<String>,
    #[serde(
        rename = "ShowSection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub show_section: Option<String>,
    #[serde(rename = "SEO-title", default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(rename = "SEO-keywords", default, deserialize_with = "deserialize_keywords")]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(
        rename = "SEO-description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub seo_description: Option<String>,
    #[serde(
        rename = "SEO-figcaption",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub seo_figcaption: Option<String>,
    #[serde(rename = "sandbox", default, skip_serializing_if = "Option::is_none")]
    pub sandbox: Option<String>,
    #[serde(rename = "ChartTitle", alias = "Charttitle", default)]
    pub chart_title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SectionFields {
    pub fn is_shown(&self) -> bool {
        self.show_section.as_deref() == Some("Yes")
    }

    pub fn year(&self) -> Option<&str> {
        non_blank(self.year.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtabDoc {
    pub subtab_fields: SubtabFields,
    pub sections: Vec<SectionFields>,
}

impl SubtabDoc {
    pub fn title(&self) -> &str {
        self.subtab_fields.subtab_title.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabDoc {
    pub tab_fields: TabFields,
    pub subtabs: Vec<SubtabDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDoc {
    pub page_fields: PageFields,
    pub tabs: Vec<TabDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteDocument {
    #[serde(default)]
    pub countries: BTreeMap<String, PageDoc>,
    #[serde(default)]
    pub democracy: BTreeMap<String, PageDoc>,
}

impl SiteDocument {
    // Country pages shadow democracy pages that share a key.
    pub fn page(&self, key: &str) -> Option<&PageDoc> {
        self.countries
            .get(key)
            .or_else(|| self.democracy.get(key))
    }

    pub fn contains_page(&self, key: &str) -> bool {
        self.countries.contains_key(key) || self.democracy.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.democracy.is_empty()
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(is_truthy))
}

fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "expected a string or number, found {other}"
            )))
        }
    })
}

fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(joined)) => Some(parse_seo_keywords(&joined)),
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
        ),
        Some(other) => {
            return Err(D::Error::custom(format!(
                "SEO-keywords must be a string or a list, found {other}"
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_fields_accept_loose_types() {
        let section: SectionFields = serde_json::from_value(json!({
            "Charttype": "Bar",
            "Year": 2021,
            "SectionOrder": "3",
            "ShowSection": "Yes",
            "SEO-keywords": "a, b ,, c",
            "Charttitle": "Results",
            "Source": "Electoral commission"
        }))
        .expect("section");

        assert_eq!(section.year(), Some("2021"));
        assert_eq!(section.section_order.as_deref(), Some("3"));
        assert!(section.is_shown());
        assert_eq!(
            section.seo_keywords,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(section.chart_title, "Results");
        assert_eq!(section.extra.get("Source"), Some(&json!("Electoral commission")));
    }

    #[test]
    fn absent_keywords_serialize_as_null_and_title_as_empty() {
        let section: SectionFields = serde_json::from_value(json!({ "Year": "  " })).expect("section");
        assert_eq!(section.year(), None);

        let encoded = serde_json::to_value(&section).expect("encode");
        assert_eq!(encoded["SEO-keywords"], Value::Null);
        assert_eq!(encoded["ChartTitle"], json!(""));
    }

    #[test]
    fn flags_follow_json_truthiness() {
        let page: PageFields =
            serde_json::from_value(json!({ "PublishStatus": "Published" })).expect("page");
        assert!(page.publish_status);

        let page: PageFields = serde_json::from_value(json!({ "PublishStatus": 0 })).expect("page");
        assert!(!page.publish_status);

        let subtab: SubtabFields = serde_json::from_value(json!({})).expect("subtab");
        assert!(!subtab.subtab_show);
    }

    #[test]
    fn tab_title_falls_back_to_democracy_name() {
        let tab = TabFields {
            democracy_tab: Some("Upcoming Elections".to_string()),
            ..Default::default()
        };
        assert_eq!(tab.title(), "Upcoming Elections");

        let tab = TabFields {
            tab_title: Some("Context".to_string()),
            democracy_tab: Some("Other".to_string()),
            ..Default::default()
        };
        assert_eq!(tab.title(), "Context");
    }

    #[test]
    fn country_pages_shadow_democracy_pages() {
        let mut doc = SiteDocument::default();
        doc.countries.insert(
            "kenya".to_string(),
            PageDoc {
                page_fields: PageFields {
                    country: Some("Kenya".to_string()),
                    ..Default::default()
                },
                tabs: Vec::new(),
            },
        );
        doc.democracy.insert("kenya".to_string(), PageDoc::default());

        let page = doc.page("kenya").expect("page");
        assert_eq!(page.page_fields.country.as_deref(), Some("Kenya"));
        assert!(doc.contains_page("kenya"));
        assert!(!doc.contains_page("ghana"));
    }
}
