//! # Purpleit Shared
//!
//! Wire types shared between the API server and the board client.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
