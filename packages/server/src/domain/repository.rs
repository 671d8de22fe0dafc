//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::value_object::{ConnectionId, RoomName, Timestamp};

/// ある時点のルームの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub name: RoomName,
    pub members: Vec<ConnectionId>,
}

/// ルームとメンバー（接続 ID の集合）のレジストリ
///
/// 各操作は単一の操作としてアトミックに実行される。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームに参加（ルームが無ければ作成）。既に参加済みなら何もしない。
    async fn join(&self, room: &RoomName, connection_id: ConnectionId);

    /// ルームから退出。参加していなければ何もしない。
    async fn leave(&self, room: &RoomName, connection_id: &ConnectionId);

    /// 現在のメンバーのスナップショット（存在しないルームは空）
    async fn members(&self, room: &RoomName) -> Vec<ConnectionId>;

    /// 既知の全ルームのスナップショット（名前順）
    async fn rooms(&self) -> Vec<RoomSnapshot>;
}

/// 重複メッセージ判定の記録ストア
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DedupRepository: Send + Sync {
    /// `room` に届いた `text` を判定して記録する。重複なら `false`。
    ///
    /// 判定と記録の更新は 1 回の呼び出しの中でアトミックに行われる。
    async fn accept(&self, room: &RoomName, text: &str, received_at: Timestamp) -> bool;
}
