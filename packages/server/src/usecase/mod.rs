//! UseCase layer: orchestrates the domain interfaces for each gateway operation.

pub mod broadcast;
pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod get_rooms;
pub mod send_message;

pub use broadcast::BroadcastDispatcher;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetRoomDetailError, SendMessageError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use send_message::{SendMessageUseCase, SendOutcome};
