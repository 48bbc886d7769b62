/*
 * Responsibility
 * - 保護 route の handler 群 (introspection → policy 評価)
 * - Path を extractor で受け、Policy を組み立てて authorize() に渡す
 * - /protected は introspection 結果をそのまま JSON で返す
 */
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::BearerToken;
use crate::error::AppError;
use crate::services::auth::policy::{self, Policy, Verdict};
use crate::state::AppState;

/// 有効なトークンなら introspection 結果をそのまま返す
///
/// - claims の解釈はせず、authorization server の応答を透過する
/// - 直列化失敗だけが server error (500)
pub async fn introspected(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    let result = match state.introspection.introspect(&token).await {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(error = %err, "introspection failed");
            return Ok(Verdict::UpstreamError(err.to_string()).into_response());
        }
    };

    let body = serde_json::to_string(&result).map_err(|_| AppError::Internal)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// `/protected/{claim}/{value}`: claim が指定値と完全一致すれば許可
pub async fn exact_claim(
    State(state): State<AppState>,
    Path((claim, value)): Path<(String, String)>,
    BearerToken(token): BearerToken,
) -> Verdict {
    let policy = Policy::ExactClaim {
        name: claim,
        expected: value,
    };

    policy::authorize(state.introspection.as_ref(), &token, &policy).await
}

/// OIDC 標準 claim のサマリを返す
pub async fn standard_claims(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Verdict {
    policy::authorize(state.introspection.as_ref(), &token, &Policy::Open).await
}

/// `resource_access.account.roles` を JSON リストで返す
pub async fn account_roles(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Verdict {
    let policy = Policy::NestedRoleLookup {
        outer_key: "resource_access".to_owned(),
        inner_key: "account".to_owned(),
        role_field: "roles".to_owned(),
    };

    policy::authorize(state.introspection.as_ref(), &token, &policy).await
}
