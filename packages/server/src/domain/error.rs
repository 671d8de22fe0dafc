//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクト生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// ルーム名が空
    #[error("Room name must not be empty")]
    EmptyRoomName,

    /// ルーム名に word 文字（英数字と `_`）以外が含まれている
    #[error("Room name '{0}' must consist of word characters only")]
    InvalidRoomName(String),

    /// 未知の dedup スコープ
    #[error("Unknown dedup scope '{0}' (expected 'room' or 'global')")]
    UnknownDedupScope(String),
}

/// 受信したチャットメッセージの解析エラー
#[derive(Debug, Error)]
pub enum MessageError {
    /// バイナリフレームが UTF-8 として解釈できない
    #[error("Payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// JSON として解析できない
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSON だがオブジェクトではない
    #[error("Payload must be a JSON object")]
    NotAnObject,

    /// `message` フィールドが存在しない、または文字列ではない
    #[error("Payload must contain a string 'message' field")]
    MissingMessage,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信先のコネクションが登録されていない
    #[error("Connection '{0}' is not registered")]
    ClientNotFound(String),

    /// チャンネルへの送信に失敗（受信側が既に閉じている）
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
