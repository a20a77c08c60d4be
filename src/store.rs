use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::SiteDocument;

#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    document: SiteDocument,
    loaded_at: DateTime<Utc>,
}

impl SiteSnapshot {
    pub fn new(document: SiteDocument) -> Self {
        Self {
            document,
            loaded_at: Utc::now(),
        }
    }

    pub fn document(&self) -> &SiteDocument {
        &self.document
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

pub async fn load_snapshot(path: &Path) -> SiteSnapshot {
    let document = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<SiteDocument>(&bytes) {
            Ok(document) => {
                info!(
                    path = %path.display(),
                    countries = document.countries.len(),
                    democracy = document.democracy.len(),
                    "Loaded site document"
                );
                document
            }
            Err(err) => {
                warn!("Error reading site document {}: {err}", path.display());
                SiteDocument::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "Site document not found at {}. Run fetch_data to generate it.",
                path.display()
            );
            SiteDocument::default()
        }
        Err(err) => {
            warn!("Failed reading site document {}: {err}", path.display());
            SiteDocument::default()
        }
    };

    SiteSnapshot::new(document)
}

fn staging_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "site-document.json".to_string());
    target.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4()))
}

pub async fn persist_document(path: &Path, document: &SiteDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let encoded =
        serde_json::to_vec_pretty(document).context("Failed to encode site document")?;
    let staging = staging_path(path);
    fs::write(&staging, &encoded)
        .await
        .with_context(|| format!("Failed to write {}", staging.display()))?;

    if let Err(err) = fs::rename(&staging, path).await {
        let _ = fs::remove_file(&staging).await;
        return Err(err).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageDoc;

    #[tokio::test]
    async fn missing_document_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshot = load_snapshot(&dir.path().join("absent.json")).await;
        assert!(snapshot.document().is_empty());
    }

    #[tokio::test]
    async fn malformed_document_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{ not json").expect("write");
        let snapshot = load_snapshot(&path).await;
        assert!(snapshot.document().is_empty());
    }

    #[tokio::test]
    async fn persisted_document_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data").join("africa_pages.json");

        let mut document = SiteDocument::default();
        document
            .countries
            .insert("kenya".to_string(), PageDoc::default());
        persist_document(&path, &document).await.expect("persist");

        let snapshot = load_snapshot(&path).await;
        assert_eq!(snapshot.document(), &document);

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().expect("parent"))
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
