use std::{env, net::SocketAddr, path::PathBuf};

use crate::error::ExtractError;

const DEFAULT_DATA_PATH: &str = "siteV2/data/africa_pages.json";
const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env_string("SITE_BIND_ADDR")
            .and_then(|raw| raw.parse::<SocketAddr>().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8000)));

        let data_path = data_path_from_env();

        let template_dir = PathBuf::from(
            env_string("SITE_TEMPLATE_DIR").unwrap_or_else(|| "siteV2/templates".to_string()),
        );

        let static_dir = PathBuf::from(
            env_string("SITE_STATIC_DIR").unwrap_or_else(|| "siteV2/static".to_string()),
        );

        let base_url = env_string("SITE_BASE_URL")
            .unwrap_or_else(|| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            bind_addr,
            data_path,
            template_dir,
            static_dir,
            base_url,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub api_key: String,
    pub base_id: String,
    pub api_url: String,
    pub data_path: PathBuf,
}

impl ExtractConfig {
    pub fn from_env() -> Result<Self, ExtractError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Fails before any I/O when either Airtable credential is missing or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExtractError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).and_then(clean_value);

        let api_key =
            read("AIRTABLE_API_KEY").ok_or(ExtractError::MissingCredentials("AIRTABLE_API_KEY"))?;
        let base_id =
            read("AIRTABLE_BASE_ID").ok_or(ExtractError::MissingCredentials("AIRTABLE_BASE_ID"))?;
        let api_url = read("AIRTABLE_API_URL")
            .unwrap_or_else(|| DEFAULT_AIRTABLE_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let data_path =
            PathBuf::from(read("SITE_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()));

        Ok(Self {
            api_key,
            base_id,
            api_url,
            data_path,
        })
    }
}

fn data_path_from_env() -> PathBuf {
    PathBuf::from(env_string("SITE_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()))
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().and_then(clean_value)
}

// Blank counts as unset.
fn clean_value(raw: String) -> Option<String> {
    let value = raw.trim().trim_matches('"').trim_matches('\'').trim();
    (!value.is_empty()).then(|| value.to_string())
}
