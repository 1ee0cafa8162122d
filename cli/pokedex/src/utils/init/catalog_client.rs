use std::path::PathBuf;

use anyhow::{Context, bail};
use pokedex_catalog::{
    CatalogClient,
    CatalogClientConfig,
    Client,
    DEFAULT_CATALOG_URL,
    MockClient,
    POKEDEX_CATALOG_MOCK_DATA_VAR,
};
use tracing::debug;

use crate::config::Config;

/// Initialize the catalog client
///
/// - Initialize a mock client if the `_POKEDEX_USE_CATALOG_MOCK` environment variable
///   is set to the path of a mock catalog
/// - Initialize a real client otherwise
pub fn init_catalog_client(config: &Config) -> Result<Client, anyhow::Error> {
    // if $_POKEDEX_USE_CATALOG_MOCK is set to a path to mock data, use the mock client
    if let Ok(path_str) = std::env::var(POKEDEX_CATALOG_MOCK_DATA_VAR) {
        let path = PathBuf::from(path_str);
        if !path.exists() {
            bail!("path to mock data file doesn't exist: {}", path.display());
        }

        debug!(mock_data_path = %path.display(), "using mock catalog client");
        return Ok(MockClient::new(Some(path))?.into());
    }

    // If not configured, use the default URL
    let catalog_url = config
        .catalog_url
        .clone()
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("pokedex/{}", env!("CARGO_PKG_VERSION")));

    debug!("using catalog client with url: {}", catalog_url);
    let client = CatalogClient::new(CatalogClientConfig {
        catalog_url,
        extra_headers: config.extra_headers.clone(),
        user_agent: Some(user_agent),
    })
    .context("could not create catalog client")?;
    Ok(client.into())
}
