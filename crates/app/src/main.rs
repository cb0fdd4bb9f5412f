//! Trove - Main Entry Point
//!
//! Composition root for the data-access layer: builds the device
//! storage, the transport, the services, and the listings store, then
//! reports the session state. The store is constructed here and handed
//! to consumers; nothing in the stack reaches for ambient globals.

mod config;

use std::sync::Arc;

use tracing::info;

use config::AppConfig;
use trove_application::services::AuthService;
use trove_application::store::ListingsStore;
use trove_infrastructure::{FileKeyValueStore, RestTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env()?;
    info!(env = %config.env, base_url = %config.base_url, "starting trove");

    let storage = Arc::new(FileKeyValueStore::new(&config.storage_path));
    let transport = Arc::new(RestTransport::new(&config.base_url, Arc::clone(&storage))?);
    let auth = AuthService::new(Arc::clone(&transport), storage);
    let mut listings = ListingsStore::new(transport);

    if auth.is_authenticated().await {
        let name = auth
            .current_user()
            .await
            .map_or_else(|| "<unknown>".to_string(), |user| user.name);
        info!(name, "session found");

        listings.fetch_listings(true).await;
        match listings.error() {
            Some(message) => info!(message, "listings fetch failed"),
            None => info!(
                count = listings.listings().len(),
                total = listings.total(),
                has_more = listings.has_more(),
                "listings primed"
            ),
        }
    } else {
        info!("no session; sign-in required");
    }

    Ok(())
}
