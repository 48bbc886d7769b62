/*
 * Responsibility
 * - Handler から見える「抽出済み bearer トークン」の型
 * - middleware がスキーム検証して request extensions に格納し、
 *   handler はこの型だけを受け取る
 *
 * Notes
 * - スキームのみ検証済み。中身 (active/claims) は introspection が判断する
 * - リクエスト境界を越えて保持しない
 */

/// 保護 route に届いた生のトークン
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the token
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}
