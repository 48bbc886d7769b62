use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

use super::types::BearerToken;

/// Handler で BearerToken を受け取るための extractor
/// middleware が BearerToken を request.extensions() に insert 済みである前提
/// 見つからない場合は 401（認証 middleware が掛かっていない route からの誤用）
impl FromRequestParts<AppState> for BearerToken
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<BearerToken>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
