//! Bearer スキーム検証 → 生トークンを extensions に入れる
//!
//! - `Authorization: Bearer <token>` のスキームだけをここで検証する
//! - トークンの中身の検証 (active か、claims は何か) は introspection 側の責務
//! - 失敗は分類付きで 401 に落とす

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::BearerToken;
use crate::error::AppError;
use crate::services::auth::token;
use crate::state::AppState;

/// 保護対象の route 群に bearer 抽出を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/protected", get(handler));
/// let protected = middleware::auth::access::apply(protected);
/// ```
pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.layer(middleware::from_fn(access_middleware))
}

async fn access_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match token::extract_bearer(header) {
        Ok(token) => token.to_owned(),
        Err(err) => {
            tracing::warn!(error = %err, "bearer extraction failed");
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}
