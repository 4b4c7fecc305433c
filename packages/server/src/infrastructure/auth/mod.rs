//! Authentication collaborator implementations.

pub mod jwt;

pub use jwt::JwtTokenService;
