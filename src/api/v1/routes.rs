/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /public と /protected 系を merge
 * - Bearer が必要な範囲にだけ middleware::auth::access を適用する
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    protected::{account_roles, exact_claim, introspected, standard_claims},
    public::public,
};

pub fn routes() -> Router<AppState> {
    let open = Router::new().route("/public", get(public));

    let protected = Router::new()
        .route("/protected", get(introspected))
        .route("/protected/{claim}/{value}", get(exact_claim))
        .route("/protected-standards", get(standard_claims))
        .route("/protected-roles", get(account_roles));

    open.merge(middleware::auth::access::apply(protected))
}
