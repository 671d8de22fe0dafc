//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::MessageError;

/// メッセージ送信のエラー
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// 受信したペイロードが解析できない（接続を終了させる）
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] MessageError),

    /// ブロードキャスト用の再シリアライズに失敗
    #[error("Failed to serialize outbound message: {0}")]
    Serialization(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}
