//! Data Transfer Objects (DTOs) for the HTTP inspection API.
//!
//! WebSocket payloads are free-form JSON objects handled by `domain::ChatMessage`.

pub mod http;
