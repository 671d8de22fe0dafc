//! チャットメッセージ
//!
//! 受信した JSON オブジェクトをそのまま保持し、ブロードキャスト前に
//! `received` フィールドだけを追加して再シリアライズする。

use roomcast_shared::time::timestamp_to_rfc3339;
use serde_json::{Map, Value};

use super::{error::MessageError, value_object::Timestamp};

/// 本文を保持するフィールド名
pub const MESSAGE_FIELD: &str = "message";
/// サーバーが付与する受信時刻のフィールド名
pub const RECEIVED_FIELD: &str = "received";

/// バイナリフレームのペイロードを UTF-8 テキストとして取り出す
///
/// テキストフレームと同じ解析経路に流すために使う。
pub fn decode_payload(bytes: &[u8]) -> Result<&str, MessageError> {
    Ok(std::str::from_utf8(bytes)?)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    fields: Map<String, Value>,
}

impl ChatMessage {
    /// JSON テキストからメッセージを解析
    ///
    /// オブジェクトであり、文字列の `message` フィールドを持つ必要がある。
    pub fn parse(raw: &str) -> Result<Self, MessageError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(fields) = value else {
            return Err(MessageError::NotAnObject);
        };
        if !matches!(fields.get(MESSAGE_FIELD), Some(Value::String(_))) {
            return Err(MessageError::MissingMessage);
        }
        Ok(Self { fields })
    }

    /// `message` フィールドの本文（重複判定に使う）
    pub fn text(&self) -> &str {
        self.fields
            .get(MESSAGE_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// 受信時刻を `received` フィールドに書き込む（クライアントが送った値は上書き）
    pub fn stamp_received(&mut self, at: Timestamp) {
        self.fields.insert(
            RECEIVED_FIELD.to_string(),
            Value::String(timestamp_to_rfc3339(at.value())),
        );
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}
