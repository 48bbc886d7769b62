//! Token introspection client (RFC 7662).
//!
//! The gateway never inspects tokens locally; every protected request asks
//! the authorization server whether the presented token is currently active
//! and which claims it carries. Opaque and revoked tokens are handled for
//! free that way.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Introspection call failures.
///
/// None of these prove the token valid, so callers must fail closed. Retry
/// policy, if any, belongs to the caller of the gateway, not here.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("introspection request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("introspection endpoint returned {status}: {body}")]
    Endpoint {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("cannot parse introspection response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Introspection response (RFC 7662 Section 2.2).
///
/// Only `active` is structural. Everything else is provider-dependent, so
/// the remaining fields are kept as a raw claim map and read through the
/// typed accessors in [`super::claims`]. An absent claim stays absent; it is
/// never conflated with a present-but-empty value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResult {
    pub active: bool,

    #[serde(flatten)]
    pub claims: HashMap<String, Value>,
}

/// Contract between the decision path and the network client.
///
/// Handlers and tests depend on this trait only; the reqwest-backed client
/// below is wired in at startup.
#[async_trait]
pub trait Introspector: Send + Sync {
    async fn introspect(&self, token: &str) -> Result<IntrospectionResult, IntrospectionError>;
}

/// reqwest-backed introspection client authenticating with client
/// credentials (confidential client).
#[derive(Clone)]
pub struct IntrospectionClient {
    endpoint: String,
    client_id: String,
    client_secret: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for IntrospectionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the client secret
        f.debug_struct("IntrospectionClient")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl IntrospectionClient {
    pub fn new(
        endpoint: String,
        client_id: String,
        client_secret: String,
        http: reqwest::Client,
    ) -> Self {
        Self {
            endpoint,
            client_id,
            client_secret,
            http,
        }
    }
}

#[async_trait]
impl Introspector for IntrospectionClient {
    async fn introspect(&self, token: &str) -> Result<IntrospectionResult, IntrospectionError> {
        let form = [
            ("token", token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = self.http.post(&self.endpoint).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IntrospectionError::Endpoint { status, body });
        }

        response
            .json::<IntrospectionResult>()
            .await
            .map_err(IntrospectionError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_active_response_with_flattened_claims() {
        let json = r#"{
            "active": true,
            "username": "alice",
            "email_verified": true,
            "resource_access": {"account": {"roles": ["admin"]}}
        }"#;

        let result: IntrospectionResult = serde_json::from_str(json).unwrap();

        assert!(result.active);
        assert_eq!(result.claims["username"], json!("alice"));
        assert_eq!(result.claims["email_verified"], json!(true));
        assert_eq!(
            result.claims["resource_access"]["account"]["roles"],
            json!(["admin"])
        );
    }

    #[test]
    fn deserializes_inactive_response() {
        let result: IntrospectionResult = serde_json::from_str(r#"{"active": false}"#).unwrap();

        assert!(!result.active);
        assert!(result.claims.is_empty());
    }

    #[test]
    fn serializes_claims_back_alongside_active() {
        let result: IntrospectionResult =
            serde_json::from_str(r#"{"active": true, "sub": "1234"}"#).unwrap();

        let wire: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(wire, json!({"active": true, "sub": "1234"}));
    }

    #[test]
    fn debug_redacts_client_secret() {
        let client = IntrospectionClient::new(
            "https://auth.example.com/introspect".to_owned(),
            "gateway".to_owned(),
            "hunter2".to_owned(),
            reqwest::Client::new(),
        );

        let printed = format!("{client:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("[REDACTED]"));
    }
}
