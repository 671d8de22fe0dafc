//! InMemory Dedup Repository 実装
//!
//! `DedupKey`（ルームごと、または全体で 1 つ）ごとに `DedupCache` を保持します。
//! 判定と記録の更新は同じロックの中で行うため、ほぼ同時に届いた 2 つの重複
//! メッセージが両方とも受理されることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DedupCache, DedupKey, DedupRepository, DedupScope, RoomName, Timestamp};

pub struct InMemoryDedupRepository {
    scope: DedupScope,
    window_millis: i64,
    caches: Mutex<HashMap<DedupKey, DedupCache>>,
}

impl InMemoryDedupRepository {
    /// 新しい InMemoryDedupRepository を作成
    ///
    /// # Arguments
    ///
    /// * `scope` - 記録を共有する範囲
    /// * `window_millis` - 重複とみなす時間幅（ミリ秒）
    pub fn new(scope: DedupScope, window_millis: i64) -> Self {
        Self {
            scope,
            window_millis,
            caches: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn scope(&self) -> DedupScope {
        self.scope
    }
}

#[async_trait]
impl DedupRepository for InMemoryDedupRepository {
    async fn accept(&self, room: &RoomName, text: &str, received_at: Timestamp) -> bool {
        let key = self.scope.key_for(room);
        let mut caches = self.caches.lock().await;
        caches
            .entry(key)
            .or_insert_with(|| DedupCache::new(self.window_millis))
            .accept(text, received_at)
    }
}
