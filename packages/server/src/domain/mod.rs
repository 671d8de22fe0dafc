//! Domain layer: value objects, the dedup policy, chat messages and the
//! interfaces the outer layers implement.

pub mod dedup;
pub mod error;
pub mod message;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use dedup::{DEFAULT_DEDUP_WINDOW_MILLIS, DedupCache, DedupKey, DedupScope};
pub use error::{MessageError, MessagePushError, ValueObjectError};
pub use message::{ChatMessage, decode_payload};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{DedupRepository, RoomRepository, RoomSnapshot};
pub use value_object::{ConnectionId, RoomName, Timestamp};
