//! UseCase: 参加者切断処理
//!
//! ルームから退出させ、送信チャンネルを登録解除する。
//! 1 つの接続につき、切断理由にかかわらず 1 回だけ呼ばれる想定。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomName, RoomRepository};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// ルームに残っている参加者数
    pub async fn execute(&self, room: &RoomName, connection_id: &ConnectionId) -> usize {
        // 1. ルームから退出（既に居なければ何もしない）
        self.repository.leave(room, connection_id).await;

        // 2. MessagePusher から登録解除（送信タスクのチャンネルが閉じる）
        self.message_pusher.unregister_client(connection_id).await;

        self.repository.members(room).await.len()
    }
}
