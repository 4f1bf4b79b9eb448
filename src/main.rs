//! Binary entry point.
//!
//! ```text
//! WEB3FORMS_ACCESS_KEY=… SITE_ROOT=./public RUST_LOG=info contact-relay
//! ```

use contact_relay::{Config, Server, Site};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> contact_relay::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    if config.access_key.is_none() {
        warn!("WEB3FORMS_ACCESS_KEY is not set; every submission will report missing_access_key");
    }
    info!(
        site_root = %config.site_root.display(),
        relay = %config.relay_url,
        "configuration loaded"
    );

    let router = Site::from_config(&config)?.into_router();
    Server::bind(config.bind_addr).serve(router).await
}
