//! Server execution logic.

use std::{future::IntoFuture, path::Path, sync::Arc};

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::watch};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Landing page served at `/`
const LANDING_PAGE: &str = "display.html";

/// Chat relay server
///
/// Owns two routers: the WebSocket chat endpoint and the HTTP endpoint that
/// serves static assets and the inspection API. They listen on separate ports.
///
/// # Example
///
/// ```ignore
/// let server = roomcast_server::app::build_server(&config, Arc::new(SystemClock));
/// server.run(&config).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        let state = Arc::new(AppState {
            connect_participant_usecase,
            disconnect_participant_usecase,
            send_message_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
        });
        Self { state }
    }

    /// Router of the WebSocket endpoint (`/chat/{room}`).
    ///
    /// Any other path is answered with 404 before an upgrade happens.
    pub fn chat_router(&self) -> Router {
        Router::new()
            .route("/chat/{room}", get(websocket_handler))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Router of the HTTP endpoint: landing page, `.css` / `.js` assets and `/api/*`.
    pub fn http_router(&self, asset_dir: &Path) -> Router {
        let assets = Router::new()
            .fallback_service(ServeDir::new(asset_dir))
            .layer(middleware::from_fn(only_stylesheets_and_scripts));

        Router::new()
            .route_service("/", ServeFile::new(asset_dir.join(LANDING_PAGE)))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .with_state(self.state.clone())
            .merge(assets)
            .layer(TraceLayer::new_for_http())
    }

    /// Run both listeners until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if either listener fails to bind or to serve.
    pub async fn run(self, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let chat_listener = TcpListener::bind(config.chat_addr()).await?;
        let http_listener = TcpListener::bind(config.http_addr()).await?;

        tracing::info!(
            "WebSocket chat endpoint listening on {}",
            chat_listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/chat/<room>", config.chat_addr());
        tracing::info!(
            "HTTP endpoint listening on {} (assets from {})",
            http_listener.local_addr()?,
            config.asset_dir.display()
        );
        tracing::info!(
            "Dedup: scope={}, window={}ms",
            config.dedup_scope,
            config.dedup_window_millis
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Both listeners stop on the same signal
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        tokio::spawn(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(());
        });

        let chat = axum::serve(chat_listener, self.chat_router())
            .with_graceful_shutdown(wait_for_shutdown(shutdown_rx.clone()));
        let http = axum::serve(http_listener, self.http_router(&config.asset_dir))
            .with_graceful_shutdown(wait_for_shutdown(shutdown_rx));

        tokio::try_join!(chat.into_future(), http.into_future())?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

async fn wait_for_shutdown(mut shutdown_rx: watch::Receiver<()>) {
    let _ = shutdown_rx.changed().await;
}

/// Only paths ending in `.css` or `.js` reach the asset directory.
async fn only_stylesheets_and_scripts(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if path.ends_with(".css") || path.ends_with(".js") {
        next.run(request).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
