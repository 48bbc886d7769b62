//! Provider discovery (OpenID Connect Discovery 1.0).
//!
//! Resolves the introspection endpoint from the configured issuer at startup
//! by fetching `{issuer}/.well-known/openid-configuration`. Runs exactly
//! once; request handling never touches discovery.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid issuer url: {0}")]
    InvalidIssuer(String),

    #[error("discovery request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("discovery endpoint returned {0}")]
    Endpoint(reqwest::StatusCode),

    #[error("issuer in discovery document ({document}) does not match configured issuer ({expected})")]
    IssuerMismatch { document: String, expected: String },

    #[error("provider does not advertise an introspection endpoint")]
    MissingIntrospectionEndpoint,
}

/// Subset of the discovery document the gateway cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,

    #[serde(default)]
    pub introspection_endpoint: Option<String>,
}

/// Fetch and validate the provider's discovery document.
///
/// The issuer inside the document must match the configured one (a trailing
/// slash is ignored on both sides); anything else points at a misconfigured
/// provider and aborts startup.
pub async fn discover(
    http: &reqwest::Client,
    issuer: &str,
) -> Result<ProviderMetadata, DiscoveryError> {
    Url::parse(issuer).map_err(|_| DiscoveryError::InvalidIssuer(issuer.to_owned()))?;

    let well_known = format!(
        "{}/.well-known/openid-configuration",
        issuer.trim_end_matches('/')
    );

    let response = http.get(&well_known).send().await?;
    if !response.status().is_success() {
        return Err(DiscoveryError::Endpoint(response.status()));
    }

    let metadata: ProviderMetadata = response.json().await?;
    if !same_issuer(&metadata.issuer, issuer) {
        return Err(DiscoveryError::IssuerMismatch {
            document: metadata.issuer,
            expected: issuer.to_owned(),
        });
    }

    Ok(metadata)
}

fn same_issuer(document: &str, expected: &str) -> bool {
    document.trim_end_matches('/') == expected.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_deserializes_with_introspection_endpoint() {
        let json = r#"{
            "issuer": "https://auth.example.com/realms/myrealm",
            "introspection_endpoint": "https://auth.example.com/realms/myrealm/protocol/openid-connect/token/introspect",
            "authorization_endpoint": "https://auth.example.com/realms/myrealm/protocol/openid-connect/auth"
        }"#;

        let metadata: ProviderMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(metadata.issuer, "https://auth.example.com/realms/myrealm");
        assert!(
            metadata
                .introspection_endpoint
                .as_deref()
                .unwrap()
                .ends_with("/token/introspect")
        );
    }

    #[test]
    fn metadata_tolerates_missing_introspection_endpoint() {
        let metadata: ProviderMetadata =
            serde_json::from_str(r#"{"issuer": "https://auth.example.com"}"#).unwrap();

        assert!(metadata.introspection_endpoint.is_none());
    }

    #[test]
    fn issuer_comparison_ignores_trailing_slash() {
        assert!(same_issuer(
            "https://auth.example.com/realms/myrealm/",
            "https://auth.example.com/realms/myrealm"
        ));
        assert!(!same_issuer(
            "https://auth.example.com/realms/other",
            "https://auth.example.com/realms/myrealm"
        ));
    }
}
