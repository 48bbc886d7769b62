/// Factory: resolve the introspection endpoint and build the shared client
/// from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::discovery::{self, DiscoveryError};
use crate::services::auth::introspection::IntrospectionClient;

pub async fn build_introspection_client(
    config: &Config,
) -> Result<Arc<IntrospectionClient>, DiscoveryError> {
    let http = reqwest::Client::new();

    // Explicit endpoint wins; otherwise ask the provider's discovery
    // document.
    let endpoint = match &config.introspection_endpoint {
        Some(endpoint) => endpoint.clone(),
        None => discovery::discover(&http, &config.issuer)
            .await?
            .introspection_endpoint
            .ok_or(DiscoveryError::MissingIntrospectionEndpoint)?,
    };

    tracing::info!(%endpoint, "resolved introspection endpoint");

    Ok(Arc::new(IntrospectionClient::new(
        endpoint,
        config.client_id.clone(),
        config.client_secret.clone(),
        http,
    )))
}
