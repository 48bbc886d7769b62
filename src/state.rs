/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - introspection client を Arc で持つ
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::Introspector;

#[derive(Clone)]
pub struct AppState {
    pub introspection: Arc<dyn Introspector>,
}

impl AppState {
    pub fn new(introspection: Arc<dyn Introspector>) -> Self {
        Self { introspection }
    }
}
