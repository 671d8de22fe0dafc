//! UseCase: ルーム一覧・詳細の取得（HTTP 確認用 API）

use std::sync::Arc;

use crate::domain::{RoomName, RoomRepository, RoomSnapshot};

use super::error::GetRoomDetailError;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 既知の全ルーム（空のルームを含む、名前順）
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.repository.rooms().await
    }
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 一度も参加されたことが無いルームは `RoomNotFound`
    pub async fn execute(&self, room: &RoomName) -> Result<RoomSnapshot, GetRoomDetailError> {
        self.repository
            .rooms()
            .await
            .into_iter()
            .find(|snapshot| &snapshot.name == room)
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(room.to_string()))
    }
}
