//! HashMap をインメモリ DB として使う Repository 実装

pub mod dedup;
pub mod room;

pub use dedup::InMemoryDedupRepository;
pub use room::InMemoryRoomRepository;
