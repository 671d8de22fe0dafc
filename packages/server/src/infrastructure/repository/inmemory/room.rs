//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! ルーム名 → メンバー集合のマップと、接続 ID → ルーム名の逆引きを
//! 1 つの Mutex で保護します。
//!
//! 空になったルームは削除せず、空集合のまま残します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomName, RoomRepository, RoomSnapshot};

#[derive(Debug, Default)]
struct Registry {
    rooms: HashMap<RoomName, HashSet<ConnectionId>>,
    /// 接続 ID がどのルームに属しているか
    membership: HashMap<ConnectionId, RoomName>,
}

/// インメモリ Room Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    registry: Mutex<Registry>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(&self, room: &RoomName, connection_id: ConnectionId) {
        let mut registry = self.registry.lock().await;

        // 1 つの接続は 1 つのルームにしか属さない
        if let Some(previous) = registry.membership.insert(connection_id, room.clone())
            && &previous != room
        {
            tracing::warn!(
                "Connection '{}' moved from room '{}' to '{}'",
                connection_id,
                previous,
                room
            );
            if let Some(members) = registry.rooms.get_mut(&previous) {
                members.remove(&connection_id);
            }
        }

        registry
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id);
    }

    async fn leave(&self, room: &RoomName, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;

        let removed = registry
            .rooms
            .get_mut(room)
            .is_some_and(|members| members.remove(connection_id));
        if removed {
            registry.membership.remove(connection_id);
        }
    }

    async fn members(&self, room: &RoomName) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry
            .rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<RoomSnapshot> {
        let registry = self.registry.lock().await;
        let mut rooms: Vec<RoomSnapshot> = registry
            .rooms
            .iter()
            .map(|(name, members)| RoomSnapshot {
                name: name.clone(),
                members: members.iter().copied().collect(),
            })
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_creates_room_implicitly() {
        // テスト項目: 存在しないルームへの参加でルームが作成される
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();

        // when (操作):
        repo.join(&room("lobby"), alice).await;

        // then (期待する結果):
        assert_eq!(repo.members(&room("lobby")).await, vec![alice]);
        let rooms = repo.rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, room("lobby"));
    }

    #[tokio::test]
    async fn test_join_is_idempotent() {
        // テスト項目: 同じ接続が同じルームに 2 回参加してもメンバーは 1 つ
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();

        // when (操作):
        repo.join(&room("lobby"), alice).await;
        repo.join(&room("lobby"), alice).await;

        // then (期待する結果):
        assert_eq!(repo.members(&room("lobby")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_leave_removes_member_and_keeps_empty_room() {
        // テスト項目: 退出するとメンバーから削除され、空のルームは残る
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();
        repo.join(&room("lobby"), alice).await;

        // when (操作):
        repo.leave(&room("lobby"), &alice).await;

        // then (期待する結果):
        assert!(repo.members(&room("lobby")).await.is_empty());
        let rooms = repo.rooms().await;
        assert_eq!(rooms.len(), 1);
        assert!(rooms[0].members.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unknown_member_is_noop() {
        // テスト項目: 参加していない接続の退出は何もしない（冪等性）
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        repo.join(&room("lobby"), alice).await;

        // when (操作):
        repo.leave(&room("lobby"), &bob).await;
        repo.leave(&room("nowhere"), &alice).await;

        // then (期待する結果):
        assert_eq!(repo.members(&room("lobby")).await, vec![alice]);
        assert!(repo.members(&room("nowhere")).await.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // テスト項目: ルームごとにメンバーが分かれている
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when (操作):
        repo.join(&room("lobby"), alice).await;
        repo.join(&room("games"), bob).await;

        // then (期待する結果):
        assert_eq!(repo.members(&room("lobby")).await, vec![alice]);
        assert_eq!(repo.members(&room("games")).await, vec![bob]);
        let names: Vec<String> = repo
            .rooms()
            .await
            .into_iter()
            .map(|r| r.name.into_string())
            .collect();
        assert_eq!(names, vec!["games", "lobby"]);
    }

    #[tokio::test]
    async fn test_connection_belongs_to_at_most_one_room() {
        // テスト項目: 別のルームに参加すると元のルームからは外れる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();
        repo.join(&room("lobby"), alice).await;

        // when (操作):
        repo.join(&room("games"), alice).await;

        // then (期待する結果):
        assert!(repo.members(&room("lobby")).await.is_empty());
        assert_eq!(repo.members(&room("games")).await, vec![alice]);
    }

    #[tokio::test]
    async fn test_snapshot_is_not_affected_by_later_mutation() {
        // テスト項目: 取得済みのスナップショットはその後の参加・退出の影響を受けない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        repo.join(&room("lobby"), alice).await;
        let snapshot = repo.members(&room("lobby")).await;

        // when (操作):
        repo.join(&room("lobby"), bob).await;
        repo.leave(&room("lobby"), &alice).await;

        // then (期待する結果):
        assert_eq!(snapshot, vec![alice]);
        assert_eq!(repo.members(&room("lobby")).await, vec![bob]);
    }

    #[tokio::test]
    async fn test_concurrent_joins_and_leaves() {
        // テスト項目: 並行した参加・退出でもメンバー集合が壊れない
        // given (前提条件):
        let repo = Arc::new(InMemoryRoomRepository::new());
        let ids: Vec<ConnectionId> = (0..64).map(|_| ConnectionId::generate()).collect();

        // when (操作): 全員参加した後、偶数番目だけ並行して退出
        let joins = ids.iter().map(|id| {
            let repo = repo.clone();
            let id = *id;
            tokio::spawn(async move { repo.join(&room("lobby"), id).await })
        });
        for handle in joins.collect::<Vec<_>>() {
            handle.await.unwrap();
        }
        let leaves = ids.iter().step_by(2).map(|id| {
            let repo = repo.clone();
            let id = *id;
            tokio::spawn(async move { repo.leave(&room("lobby"), &id).await })
        });
        for handle in leaves.collect::<Vec<_>>() {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let members = repo.members(&room("lobby")).await;
        assert_eq!(members.len(), 32);
        for id in ids.iter().skip(1).step_by(2) {
            assert!(members.contains(id));
        }
    }
}
