//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::usecase::{
    CreateRoomUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, SessionManager,
    VerifyTokenUseCase,
};

use super::{
    handler::{
        generate_room, get_room_detail, get_rooms, health_check, user_join, verify_token,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Collaborative code room server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     session_manager,
///     create_room_usecase,
///     join_room_usecase,
///     verify_token_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
/// )
/// .with_allowed_origin(HeaderValue::from_static("http://localhost:5173"));
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// SessionManager（WebSocket 接続ごとのイベント処理）
    session_manager: Arc<SessionManager>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// VerifyTokenUseCase（トークン検証のユースケース）
    verify_token_usecase: Arc<VerifyTokenUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// CORS で許可するフロントエンドのオリジン（未設定なら全て許可）
    allowed_origin: Option<HeaderValue>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        session_manager: Arc<SessionManager>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        verify_token_usecase: Arc<VerifyTokenUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            session_manager,
            create_room_usecase,
            join_room_usecase,
            verify_token_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            allowed_origin: None,
        }
    }

    /// Restrict CORS to a single frontend origin (with credentials).
    pub fn with_allowed_origin(mut self, origin: HeaderValue) -> Self {
        self.allowed_origin = Some(origin);
        self
    }

    /// Build the router with every route and layer attached.
    pub fn into_router(self) -> Router {
        let cors = match self.allowed_origin {
            Some(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true),
            None => CorsLayer::permissive(),
        };

        let app_state = Arc::new(AppState {
            session_manager: self.session_manager,
            create_room_usecase: self.create_room_usecase,
            join_room_usecase: self.join_room_usecase,
            verify_token_usecase: self.verify_token_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/generate-room", post(generate_room))
            .route("/api/user-join", post(user_join))
            .route("/api/verify-token", post(verify_token))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .route("/api/health", get(health_check))
            .with_state(app_state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Run the room server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?token=<token>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
