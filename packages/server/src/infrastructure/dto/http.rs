//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::RoomSnapshot;

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub member_count: usize,
}

/// Body of `GET /api/rooms/{room}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    /// Connection ids, sorted
    pub members: Vec<String>,
}

impl From<RoomSnapshot> for RoomSummaryDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            member_count: room.members.len(),
            name: room.name.into_string(),
        }
    }
}

impl From<RoomSnapshot> for RoomDetailDto {
    fn from(room: RoomSnapshot) -> Self {
        let mut members: Vec<String> = room.members.iter().map(ToString::to_string).collect();
        members.sort();
        Self {
            name: room.name.into_string(),
            members,
        }
    }
}
