//! Session Manager: 接続ごとのイベントを各ユースケースに振り分ける
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SessionManager の open / handle / close
//! - 接続のライフサイクル（Connected → Joined → Disconnected）に沿ったイベント処理
//!
//! ### なぜこのテストが必要か
//! - 参加前のイベントが無視されること、参加失敗時に `error` が本人にだけ届くことを保証
//! - Alice / Bob の一連のシナリオでイベントの宛先と順序を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：作成者と参加者の編集・入力中表示・出力共有・切断
//! - 異常系：存在しない Room、トークンと一致しない参加要求、使用中の名前、二重切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RoomEvent, RoomRepository, Session,
    SessionBinding, SessionCommand, TokenClaims,
};

use super::{
    ChangeCodeUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    RelayOutputUseCase, UpdateTypingUseCase, error::SessionEventError,
};

/// 接続ごとのセッションを管理する
pub struct SessionManager {
    message_pusher: Arc<dyn MessagePusher>,
    connect: ConnectParticipantUseCase,
    change_code: ChangeCodeUseCase,
    update_typing: UpdateTypingUseCase,
    relay_output: RelayOutputUseCase,
    disconnect: DisconnectParticipantUseCase,
}

impl SessionManager {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        evict_empty_rooms: bool,
    ) -> Self {
        Self {
            connect: ConnectParticipantUseCase::new(repository.clone(), message_pusher.clone()),
            change_code: ChangeCodeUseCase::new(repository.clone(), message_pusher.clone()),
            update_typing: UpdateTypingUseCase::new(repository.clone(), message_pusher.clone()),
            relay_output: RelayOutputUseCase::new(repository.clone(), message_pusher.clone()),
            disconnect: DisconnectParticipantUseCase::new(
                repository,
                message_pusher.clone(),
                evict_empty_rooms,
            ),
            message_pusher,
        }
    }

    /// 新しい接続のセッションを作成し、送信チャンネルを登録する
    pub async fn open(&self, authorized: TokenClaims, sender: PusherChannel) -> Session {
        let session = Session::new(ConnectionId::generate(), authorized);
        self.message_pusher
            .register_client(session.connection_id(), sender)
            .await;
        tracing::debug!("Connection '{}' opened", session.connection_id());
        session
    }

    /// 受信したコマンドを処理する
    ///
    /// 参加の失敗は `error` イベントとして本人に返す。それ以外の失敗はログに残して無視する。
    pub async fn handle(&self, session: &mut Session, command: SessionCommand) {
        let connection_id = session.connection_id();
        match command {
            SessionCommand::JoinRoom { room_id, name } => {
                self.join(session, room_id, name).await;
            }
            SessionCommand::ChangeCode(code) => {
                if let Some(binding) = bound(session, "change-code") {
                    let result = self.change_code.execute(connection_id, &binding, code).await;
                    log_dropped(connection_id, "change-code", result);
                }
            }
            SessionCommand::Typing {
                room_id,
                name,
                typing,
            } => {
                if let Some(binding) = bound(session, "user-typing") {
                    let result = self
                        .update_typing
                        .execute(&binding, &room_id, name, typing)
                        .await;
                    log_dropped(connection_id, "user-typing", result);
                }
            }
            SessionCommand::RunOutput(output) => {
                if let Some(binding) = bound(session, "run-code-output") {
                    let result = self.relay_output.execute(&binding, output).await;
                    log_dropped(connection_id, "run-code-output", result);
                }
            }
        }
    }

    /// セッションを終了する（何度呼んでもよい）
    pub async fn close(&self, session: &mut Session) {
        let connection_id = session.connection_id();
        if let Some(binding) = session.close() {
            let result = self.disconnect.execute(connection_id, &binding).await;
            log_dropped(connection_id, "disconnect", result.map(|_| ()));
        }
        self.message_pusher.unregister_client(&connection_id).await;
        tracing::debug!("Connection '{}' closed", connection_id);
    }

    async fn join(&self, session: &mut Session, room_id: String, name: String) {
        let connection_id = session.connection_id();
        if session.binding().is_some() || session.is_closed() {
            tracing::debug!(
                "Ignoring join-room from connection '{}': already bound",
                connection_id
            );
            return;
        }

        if let Err(e) = self.connect.execute(session, room_id, name).await {
            tracing::warn!("Connection '{}' failed to join: {}", connection_id, e);
            let event = RoomEvent::Error(e.to_string());
            if let Err(e) = self.message_pusher.push_to(&connection_id, &event).await {
                tracing::warn!("Failed to send error to '{}': {}", connection_id, e);
            }
        }
    }
}

/// Joined でなければ `None`（イベントは無視される）
fn bound(session: &Session, event: &str) -> Option<SessionBinding> {
    let binding = session.binding().cloned();
    if binding.is_none() {
        tracing::debug!(
            "Ignoring {} from connection '{}' before join-room",
            event,
            session.connection_id()
        );
    }
    binding
}

fn log_dropped(connection_id: ConnectionId, event: &str, result: Result<(), SessionEventError>) {
    match result {
        Ok(()) => {}
        Err(SessionEventError::ParticipantNotFound(name)) => {
            tracing::debug!("Dropped {} for '{}': participant already gone", event, name);
        }
        Err(e) => {
            tracing::warn!("Dropped {} from connection '{}': {}", event, connection_id, e);
        }
    }
}
