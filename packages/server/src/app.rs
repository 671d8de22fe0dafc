//! Dependency wiring.

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryDedupRepository, InMemoryRoomRepository},
    },
    ui::Server,
    usecase::{
        BroadcastDispatcher, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, SendMessageUseCase,
    },
};

/// Build a `Server` backed by the in-memory stores.
///
/// Dependencies are created in order:
/// 1. Repositories
/// 2. MessagePusher
/// 3. UseCases
/// 4. Server
pub fn build_server(config: &ServerConfig, clock: Arc<dyn Clock>) -> Server {
    // 1. Repositories (in-memory)
    let room_repository = Arc::new(InMemoryRoomRepository::new());
    let dedup_repository = Arc::new(InMemoryDedupRepository::new(
        config.dedup_scope,
        config.dedup_window_millis,
    ));

    // 2. MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        room_repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        room_repository.clone(),
        message_pusher.clone(),
    ));
    let dispatcher = Arc::new(BroadcastDispatcher::new(
        room_repository.clone(),
        message_pusher,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        dedup_repository,
        dispatcher,
        clock,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(room_repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(room_repository));

    // 4. Server
    Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        send_message_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    )
}
