//! Authorization policies and the decision engine.
//!
//! `evaluate` is the synchronous core: introspection result + policy in,
//! verdict out, no I/O and no hidden state. `authorize` wraps the one async
//! step (the introspection call) around it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::introspection::{IntrospectionResult, Introspector};

/// Claim predicate applied once the token is known to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// No claim check; an active token is enough.
    Open,

    /// `claims[name]` must be a non-empty string exactly equal to `expected`.
    ExactClaim { name: String, expected: String },

    /// `claims[outer_key][inner_key][role_field]` must be a list of strings.
    NestedRoleLookup {
        outer_key: String,
        inner_key: String,
        role_field: String,
    },
}

/// Response payload of an authorized request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Json(Value),
}

/// Terminal outcome of one authorization attempt.
///
/// Constructed once per request and rendered immediately; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Authorized(Payload),
    Denied(&'static str),
    UpstreamError(String),
}

impl IntoResponse for Verdict {
    fn into_response(self) -> Response {
        match self {
            Verdict::Authorized(Payload::Text(body)) => body.into_response(),
            Verdict::Authorized(Payload::Json(value)) => Json(value).into_response(),
            // Denials carry the reason as plain body text; upstream failures
            // fail closed with the same status.
            Verdict::Denied(reason) => (StatusCode::FORBIDDEN, reason).into_response(),
            Verdict::UpstreamError(detail) => (StatusCode::FORBIDDEN, detail).into_response(),
        }
    }
}

/// Evaluate an introspection result against a policy.
///
/// Total: every input produces a verdict. An inactive token is denied before
/// any claim is read, whatever the policy.
pub fn evaluate(result: &IntrospectionResult, policy: &Policy) -> Verdict {
    if !result.active {
        return Verdict::Denied("token inactive");
    }

    match policy {
        Policy::Open => Verdict::Authorized(Payload::Text(standard_claims_summary(result))),

        Policy::ExactClaim { name, expected } => match result.string_claim(name) {
            Some(value) if !value.is_empty() && value == expected.as_str() => {
                Verdict::Authorized(Payload::Text(format!("authorized with value {value}")))
            }
            _ => Verdict::Denied("claim does not match"),
        },

        Policy::NestedRoleLookup {
            outer_key,
            inner_key,
            role_field,
        } => {
            // Both accessor failure kinds collapse into one denial; the
            // caller cannot act differently on "missing" vs "wrong shape".
            match result.nested_roles(outer_key, inner_key, role_field) {
                Ok(roles) => Verdict::Authorized(Payload::Json(Value::from(roles))),
                Err(_) => Verdict::Denied("cannot retrieve resource_access"),
            }
        }
    }
}

/// Introspect `token`, then evaluate the result against `policy`.
///
/// The only async step of the decision path. Introspection failures fail
/// closed as `UpstreamError`; claims are never read from a failed call.
pub async fn authorize(introspector: &dyn Introspector, token: &str, policy: &Policy) -> Verdict {
    match introspector.introspect(token).await {
        Ok(result) => evaluate(&result, policy),
        Err(err) => {
            tracing::warn!(error = %err, "introspection failed");
            Verdict::UpstreamError(err.to_string())
        }
    }
}

/// OIDC standard-claim summary, one `Name=value` line per claim.
///
/// Absent claims render as empty values; the summary never fails.
fn standard_claims_summary(result: &IntrospectionResult) -> String {
    let email_verified = result
        .bool_claim("email_verified")
        .map(|v| v.to_string())
        .unwrap_or_default();

    [
        format!(
            "Birthday={}",
            result.string_claim("birthdate").unwrap_or_default()
        ),
        format!("Email={}", result.string_claim("email").unwrap_or_default()),
        format!(
            "Gender={}",
            result.string_claim("gender").unwrap_or_default()
        ),
        format!(
            "Picture={}",
            result.string_claim("picture").unwrap_or_default()
        ),
        format!("Subject={}", result.string_claim("sub").unwrap_or_default()),
        format!("Email Verified={email_verified}"),
    ]
    .join("\n")
}
