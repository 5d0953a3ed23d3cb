//! Purpleit board client.
//!
//! Data access facade over the board API plus one state machine per view.
//! Rendering is left to the host; views expose plain data.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod notice;
pub mod request_seq;
pub mod route;
pub mod shell;
pub mod views;

#[cfg(test)]
mod testing;

pub use api::BoardApi;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::HttpBoardApi;
pub use notice::Notice;
pub use route::Route;
pub use shell::{Screen, Shell};
