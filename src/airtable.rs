use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info};

use crate::{
    config::ExtractConfig,
    models::{SiteDocument, SourceRecord, SourceTables},
    transform::{extract_country_data, extract_democracy_data},
};

#[derive(Debug, Clone, Copy)]
pub struct TableNames {
    pub pages: &'static str,
    pub tabs: &'static str,
    pub subtabs: &'static str,
    pub sections: &'static str,
}

pub const COUNTRY_TABLES: TableNames = TableNames {
    pages: "Pages",
    tabs: "Tabs",
    subtabs: "Subtabs",
    sections: "Sections",
};

pub const DEMOCRACY_TABLES: TableNames = TableNames {
    pages: "Democracy-pages",
    tabs: "Democracy-tabs",
    subtabs: "Democracy-subtabs",
    sections: "Democracy-sections",
};

const PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
struct ListRecordsResponse<F> {
    records: Vec<SourceRecord<F>>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: Client,
    api_url: String,
    base_id: String,
    api_key: String,
}

impl AirtableClient {
    pub fn new(api_url: String, base_id: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id,
            api_key,
        }
    }

    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            config.base_id.clone(),
            config.api_key.clone(),
        )
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid Airtable API URL {}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Airtable API URL cannot be a base: {}", self.api_url))?
            .push(&self.base_id)
            .push(table);
        Ok(url)
    }

    pub async fn list_records<F>(&self, table: &str) -> Result<Vec<SourceRecord<F>>>
    where
        F: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .bearer_auth(&self.api_key)
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(offset) = &offset {
                request = request.query(&[("offset", offset.as_str())]);
            }

            let response = request
                .send()
                .await
                .with_context(|| format!("Failed to fetch Airtable table {table}"))?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!(
                    "Airtable request for {table} failed with HTTP {status}: {}",
                    body.trim()
                );
            }

            let page: ListRecordsResponse<F> = response
                .json()
                .await
                .with_context(|| format!("Failed to decode Airtable records for {table}"))?;
            debug!(table, fetched = page.records.len(), "Fetched Airtable page");
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        info!(table, records = records.len(), "Fetched Airtable table");
        Ok(records)
    }

    pub async fn fetch_tables(&self, names: TableNames) -> Result<SourceTables> {
        Ok(SourceTables {
            pages: self.list_records(names.pages).await?,
            tabs: self.list_records(names.tabs).await?,
            subtabs: self.list_records(names.subtabs).await?,
            sections: self.list_records(names.sections).await?,
        })
    }

    pub async fn fetch_site_document(&self) -> Result<SiteDocument> {
        let country_tables = self.fetch_tables(COUNTRY_TABLES).await?;
        let democracy_tables = self.fetch_tables(DEMOCRACY_TABLES).await?;

        Ok(SiteDocument {
            countries: extract_country_data(&country_tables),
            democracy: extract_democracy_data(&democracy_tables),
        })
    }
}
