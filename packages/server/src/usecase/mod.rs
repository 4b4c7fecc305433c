//! UseCase layer: application operations over the room registry and the
//! broadcast router.

mod change_code;
mod connect_participant;
mod create_room;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod relay_output;
mod room_guard;
mod session;
mod update_typing;
mod verify_token;

#[cfg(test)]
mod test_support;

pub use change_code::ChangeCodeUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{
    ConnectError, CreateRoomError, GetRoomDetailError, JoinRoomError, SessionEventError,
};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_output::RelayOutputUseCase;
pub use session::SessionManager;
pub use update_typing::UpdateTypingUseCase;
pub use verify_token::VerifyTokenUseCase;
