//! UseCase: メッセージ送信処理
//!
//! 1. 受信テキストを JSON オブジェクトとして解析（失敗したら MalformedPayload）
//! 2. `message` フィールドを現在時刻とともに重複判定にかける
//! 3. 受理されたら `received` を付与して再シリアライズし、ルームへブロードキャスト

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{ChatMessage, ConnectionId, DedupRepository, RoomName, Timestamp};

use super::{broadcast::BroadcastDispatcher, error::SendMessageError};

/// メッセージ送信の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// ブロードキャストした（配信できた接続 ID と送信した JSON）
    Broadcast {
        delivered: Vec<ConnectionId>,
        payload: String,
    },
    /// 重複として抑制した
    Suppressed,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// 重複判定ストア
    dedup_repository: Arc<dyn DedupRepository>,
    /// ブロードキャストの配信役
    dispatcher: Arc<BroadcastDispatcher>,
    /// 受信時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        dedup_repository: Arc<dyn DedupRepository>,
        dispatcher: Arc<BroadcastDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            dedup_repository,
            dispatcher,
            clock,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 送信元の接続が属するルーム
    /// * `raw` - 受信したテキストフレーム
    ///
    /// # Errors
    ///
    /// * `SendMessageError::MalformedPayload` - JSON オブジェクトでない、または `message` が無い
    pub async fn execute(
        &self,
        room: &RoomName,
        raw: &str,
    ) -> Result<SendOutcome, SendMessageError> {
        // 1. 解析
        let mut message = ChatMessage::parse(raw)?;

        // 2. 重複判定
        let received_at = Timestamp::new(self.clock.now_millis());
        if !self
            .dedup_repository
            .accept(room, message.text(), received_at)
            .await
        {
            tracing::info!("Duplicate rejected in room '{}'", room);
            return Ok(SendOutcome::Suppressed);
        }

        // 3. received を付与してブロードキャスト
        message.stamp_received(received_at);
        let payload = message
            .to_json()
            .map_err(|e| SendMessageError::Serialization(e.to_string()))?;
        tracing::debug!("Broadcasting to room '{}': {}", room, payload);
        let delivered = self.dispatcher.broadcast(room, &payload).await;

        Ok(SendOutcome::Broadcast { delivered, payload })
    }
}
