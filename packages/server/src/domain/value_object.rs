//! 値オブジェクト
//!
//! - `RoomName`: `/chat/{room}` から取り出したルーム名（`\w+`）
//! - `ConnectionId`: 接続ごとに払い出す不透明な ID
//! - `Timestamp`: Unix ミリ秒

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// ルーム名
///
/// 1 文字以上の word 文字（ASCII 英数字と `_`）のみで構成される。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomName);
        }
        if !value.chars().all(is_word_char) {
            return Err(ValueObjectError::InvalidRoomName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 接続 ID
///
/// 接続確立時に UUID v4 で払い出す。接続のライフタイム中は 1 つのルームにのみ属する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `earlier` からの経過ミリ秒（時計が戻った場合は負になる）
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_accepts_word_characters() {
        // テスト項目: 英数字と `_` のみのルーム名は受け付けられる
        // given (前提条件):
        let names = ["room1", "Lobby", "team_42", "_"];

        // when (操作):
        let results: Vec<_> = names
            .iter()
            .map(|n| RoomName::new(n.to_string()))
            .collect();

        // then (期待する結果):
        for (name, result) in names.iter().zip(results) {
            assert_eq!(result.unwrap().as_str(), *name);
        }
    }

    #[test]
    fn test_room_name_rejects_empty() {
        // テスト項目: 空のルーム名はエラーになる
        // given (前提条件):
        let name = String::new();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomName));
    }

    #[test]
    fn test_room_name_rejects_non_word_characters() {
        // テスト項目: word 文字以外を含むルーム名はエラーになる
        // given (前提条件):
        let names = ["room-1", "a/b", "hello world", "ルーム", "room.js"];

        for name in names {
            // when (操作):
            let result = RoomName::try_from(name.to_string());

            // then (期待する結果):
            assert_eq!(
                result,
                Err(ValueObjectError::InvalidRoomName(name.to_string()))
            );
        }
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される接続 ID は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 36);
    }

    #[test]
    fn test_timestamp_millis_since() {
        // テスト項目: 経過時間が正しく計算され、時計が戻った場合は負になる
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(4_000);

        // when (操作):
        let forward = later.millis_since(earlier);
        let backward = earlier.millis_since(later);

        // then (期待する結果):
        assert_eq!(forward, 3_000);
        assert_eq!(backward, -3_000);
    }
}
