//! Collaborative code room server.
//!
//! Rooms are created and joined over HTTP; editing, typing indicators and
//! run output are shared over WebSocket.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=secret cargo run --bin sharepad-server
//! cargo run --bin sharepad-server -- --host 0.0.0.0 --port 3000 --jwt-secret secret
//! ```

use std::sync::Arc;

use axum::http::HeaderValue;
use clap::Parser;
use sharepad_server::{
    infrastructure::{
        auth::{JwtTokenService, jwt::DEFAULT_TOKEN_TTL_SECS},
        message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
    ui::Server,
    usecase::{
        CreateRoomUseCase, GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase,
        SessionManager, VerifyTokenUseCase,
    },
};
use sharepad_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sharepad-server")]
#[command(about = "Collaborative code room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Secret used to sign and verify room tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Frontend origin allowed by CORS (any origin when unset)
    #[arg(long, env = "FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Lifetime of issued tokens in seconds
    #[arg(long, default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    token_ttl_secs: u64,

    /// Keep rooms in the registry after their last participant leaves
    #[arg(long)]
    keep_empty_rooms: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let allowed_origin = match args.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => Some(origin),
        Some(Err(e)) => {
            tracing::error!("Invalid --frontend-url: {}", e);
            std::process::exit(1);
        }
        None => None,
    };

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. TokenService
    // 4. UseCases
    // 5. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create TokenService (JWT implementation)
    let token_service = Arc::new(JwtTokenService::new(&args.jwt_secret, args.token_ttl_secs));

    // 4. Create UseCases
    let session_manager = Arc::new(SessionManager::new(
        repository.clone(),
        message_pusher.clone(),
        !args.keep_empty_rooms,
    ));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(
        repository.clone(),
        token_service.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        token_service.clone(),
    ));
    let verify_token_usecase = Arc::new(VerifyTokenUseCase::new(token_service.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 5. Create and run the server
    let mut server = Server::new(
        session_manager,
        create_room_usecase,
        join_room_usecase,
        verify_token_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    if let Some(origin) = allowed_origin {
        server = server.with_allowed_origin(origin);
    }
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
