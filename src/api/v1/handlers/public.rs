/*
 * Responsibility
 * - GET /public (認可なしの疎通用)
 * - OK + 現在時刻を返す
 */
use axum::response::IntoResponse;
use chrono::Utc;

pub async fn public() -> impl IntoResponse {
    format!("OK {}", Utc::now())
}
