//! UseCase: ルームへのブロードキャスト
//!
//! 呼び出し時点のメンバーのスナップショットに対して、送信者自身も含めて配信する。
//! 個々の配信失敗（直前に切断された接続など）はログに残してスキップし、
//! 残りのメンバーへの配信は継続する。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomName, RoomRepository};

/// ブロードキャストの配信役
pub struct BroadcastDispatcher {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastDispatcher {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `room` の全メンバーに `payload` を配信
    ///
    /// # Returns
    ///
    /// 配信に成功した接続 ID のリスト
    pub async fn broadcast(&self, room: &RoomName, payload: &str) -> Vec<ConnectionId> {
        let targets = self.repository.members(room).await;
        let mut delivered = Vec::with_capacity(targets.len());

        for target in targets {
            match self.message_pusher.push_to(&target, payload).await {
                Ok(()) => delivered.push(target),
                Err(e) => {
                    tracing::warn!(
                        "Failed to deliver message to '{}' in room '{}': {}",
                        target,
                        room,
                        e
                    );
                }
            }
        }

        tracing::debug!(
            "Broadcasted message to {} member(s) of room '{}'",
            delivered.len(),
            room
        );
        delivered
    }
}
