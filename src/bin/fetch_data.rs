use anyhow::Result;
use election_pages::{airtable::AirtableClient, config::ExtractConfig, store::persist_document};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "election_pages=info,fetch_data=info".into()),
        )
        .init();

    let config = ExtractConfig::from_env()?;
    let client = AirtableClient::from_config(&config);

    info!("Fetching Airtable data");
    let document = client.fetch_site_document().await?;
    persist_document(&config.data_path, &document).await?;

    info!(
        path = %config.data_path.display(),
        countries = document.countries.len(),
        democracy = document.democracy.len(),
        "Site document written"
    );
    Ok(())
}
