//! Typed accessors over the introspection claim map.
//!
//! Claim schemas vary between providers, so flat accessors are fail-soft: a
//! present value of the wrong JSON type reads as absent instead of raising a
//! type error. The nested role lookup is stricter because its callers need a
//! complete list or nothing.

use serde_json::Value;
use thiserror::Error;

use super::introspection::IntrospectionResult;

/// Failures while digging a structured claim out of an introspection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessorError {
    #[error("claim not found")]
    ClaimNotFound,
    #[error("malformed claim")]
    MalformedClaim,
}

impl IntrospectionResult {
    /// Raw claim lookup. The claim map is never mutated.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// String claim; any other JSON type reads as absent.
    pub fn string_claim(&self, name: &str) -> Option<&str> {
        self.claim(name).and_then(Value::as_str)
    }

    /// Bool claim; same fail-soft rule as [`Self::string_claim`].
    pub fn bool_claim(&self, name: &str) -> Option<bool> {
        self.claim(name).and_then(Value::as_bool)
    }

    /// Walk `claims[outer_key][inner_key][role_field]` and read it as a list
    /// of strings.
    ///
    /// The first two levels must be JSON objects and the last a JSON array;
    /// anything else is `ClaimNotFound`. Elements are all-or-nothing: one
    /// non-string element fails the whole lookup with `MalformedClaim`
    /// rather than returning a partial list.
    pub fn nested_roles(
        &self,
        outer_key: &str,
        inner_key: &str,
        role_field: &str,
    ) -> Result<Vec<String>, AccessorError> {
        let outer = self
            .claim(outer_key)
            .and_then(Value::as_object)
            .ok_or(AccessorError::ClaimNotFound)?;

        let inner = outer
            .get(inner_key)
            .and_then(Value::as_object)
            .ok_or(AccessorError::ClaimNotFound)?;

        let roles = inner
            .get(role_field)
            .and_then(Value::as_array)
            .ok_or(AccessorError::ClaimNotFound)?;

        roles
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(AccessorError::MalformedClaim)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(value: serde_json::Value) -> IntrospectionResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn string_claim_returns_strings_only() {
        let r = result(json!({"active": true, "username": "alice", "count": 3}));

        assert_eq!(r.string_claim("username"), Some("alice"));
        assert_eq!(r.string_claim("count"), None);
        assert_eq!(r.string_claim("missing"), None);
    }

    #[test]
    fn bool_claim_returns_bools_only() {
        let r = result(json!({"active": true, "email_verified": true, "email": "a@b.com"}));

        assert_eq!(r.bool_claim("email_verified"), Some(true));
        assert_eq!(r.bool_claim("email"), None);
        assert_eq!(r.bool_claim("missing"), None);
    }

    #[test]
    fn present_empty_value_differs_from_absent() {
        let r = result(json!({"active": true, "username": ""}));

        assert_eq!(r.string_claim("username"), Some(""));
        assert!(r.claim("missing").is_none());
    }

    #[test]
    fn nested_roles_happy_path() {
        let r = result(json!({
            "active": true,
            "resource_access": {"account": {"roles": ["admin", "user"]}}
        }));

        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Ok(vec!["admin".to_owned(), "user".to_owned()])
        );
    }

    #[test]
    fn nested_roles_missing_outer_key() {
        let r = result(json!({"active": true}));

        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::ClaimNotFound)
        );
    }

    #[test]
    fn nested_roles_missing_inner_key() {
        let r = result(json!({"active": true, "resource_access": {"web": {}}}));

        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::ClaimNotFound)
        );
    }

    #[test]
    fn nested_roles_missing_role_field() {
        let r = result(json!({
            "active": true,
            "resource_access": {"account": {"scopes": ["email"]}}
        }));

        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::ClaimNotFound)
        );
    }

    #[test]
    fn nested_roles_wrong_shape_reads_as_not_found() {
        let r = result(json!({"active": true, "resource_access": "admin"}));
        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::ClaimNotFound)
        );

        let r = result(json!({
            "active": true,
            "resource_access": {"account": {"roles": "admin"}}
        }));
        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::ClaimNotFound)
        );
    }

    #[test]
    fn nested_roles_non_string_element_is_malformed() {
        let r = result(json!({
            "active": true,
            "resource_access": {"account": {"roles": ["admin", 42]}}
        }));

        assert_eq!(
            r.nested_roles("resource_access", "account", "roles"),
            Err(AccessorError::MalformedClaim)
        );
    }
}
