//! UseCase: 参加者接続処理
//!
//! 接続 ID を払い出し、送信チャンネルを MessagePusher に登録してから
//! ルームに参加させる。登録を先に行うことで、ブロードキャストのスナップショットに
//! チャンネル未登録のメンバーが現れないようにしている。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel, RoomName, RoomRepository};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `room` - 参加するルーム
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 払い出した接続 ID
    pub async fn execute(&self, room: &RoomName, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();

        // 1. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        // 2. ルームに参加（ルームが無ければ作成される）
        self.repository.join(room, connection_id).await;

        connection_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::message_pusher::MockMessagePusher,
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use tokio::sync::mpsc;

    fn lobby() -> RoomName {
        RoomName::new("lobby".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_connect_participant_joins_room() {
        // テスト項目: 接続するとルームのメンバーに追加される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectParticipantUseCase::new(repository.clone(), message_pusher.clone());

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection_id = usecase.execute(&lobby(), tx).await;

        // then (期待する結果):
        assert_eq!(repository.members(&lobby()).await, vec![connection_id]);
        assert_eq!(message_pusher.count_clients().await, 1);
    }

    #[tokio::test]
    async fn test_connect_participant_assigns_unique_ids() {
        // テスト項目: 同じルームに 2 回接続すると異なる接続 ID が払い出される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase =
            ConnectParticipantUseCase::new(repository.clone(), Arc::new(WebSocketMessagePusher::new()));

        // when (操作):
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let first = usecase.execute(&lobby(), tx1).await;
        let second = usecase.execute(&lobby(), tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(repository.members(&lobby()).await.len(), 2);
    }

    #[tokio::test]
    async fn test_connect_participant_registers_channel_with_pusher() {
        // テスト項目: 払い出した接続 ID で MessagePusher に登録される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_register_client()
            .times(1)
            .returning(|_, _| ());
        let usecase = ConnectParticipantUseCase::new(repository.clone(), Arc::new(message_pusher));

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection_id = usecase.execute(&lobby(), tx).await;

        // then (期待する結果): times(1) は drop 時に検証される
        assert!(repository.members(&lobby()).await.contains(&connection_id));
    }
}
