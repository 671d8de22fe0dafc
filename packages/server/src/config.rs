//! Server configuration.

use std::path::PathBuf;

use crate::domain::{DEFAULT_DEDUP_WINDOW_MILLIS, DedupScope};

/// Default host of the WebSocket chat endpoint (all interfaces)
pub const DEFAULT_CHAT_HOST: &str = "0.0.0.0";
/// Default host of the static asset / HTTP API endpoint (loopback only)
pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
/// Default port of the WebSocket chat endpoint
pub const DEFAULT_CHAT_PORT: u16 = 8090;
/// Default port of the static asset / HTTP API endpoint
pub const DEFAULT_HTTP_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address the chat listener binds to
    pub host: String,
    pub chat_port: u16,
    /// Host address the static asset / HTTP API listener binds to
    pub http_host: String,
    pub http_port: u16,
    /// Directory holding `display.html` and the `.css` / `.js` assets
    pub asset_dir: PathBuf,
    pub dedup_window_millis: i64,
    pub dedup_scope: DedupScope,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CHAT_HOST.to_string(),
            chat_port: DEFAULT_CHAT_PORT,
            http_host: DEFAULT_HTTP_HOST.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            asset_dir: PathBuf::from("web"),
            dedup_window_millis: DEFAULT_DEDUP_WINDOW_MILLIS,
            dedup_scope: DedupScope::PerRoom,
        }
    }
}

impl ServerConfig {
    pub fn chat_addr(&self) -> String {
        format!("{}:{}", self.host, self.chat_port)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_ports() {
        // テスト項目: デフォルト設定はチャットが全インターフェースの 8090、HTTP がループバックの 8080、5 秒ウィンドウ
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.chat_addr(), "0.0.0.0:8090");
        assert_eq!(config.http_addr(), "127.0.0.1:8080");
        assert_eq!(config.dedup_window_millis, 5_000);
        assert_eq!(config.dedup_scope, DedupScope::PerRoom);
    }

    #[test]
    fn test_listeners_bind_to_their_own_hosts() {
        // テスト項目: チャットと HTTP はそれぞれ別のホストにバインドできる
        // given (前提条件):
        let config = ServerConfig {
            host: "192.0.2.10".to_string(),
            http_host: "localhost".to_string(),
            ..ServerConfig::default()
        };

        // when (操作):
        let chat_addr = config.chat_addr();
        let http_addr = config.http_addr();

        // then (期待する結果):
        assert_eq!(chat_addr, "192.0.2.10:8090");
        assert_eq!(http_addr, "localhost:8080");
    }
}
