//! Utilities shared by the Sharepad binaries and libraries.

pub mod logger;
pub mod time;
