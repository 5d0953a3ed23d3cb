//! # Purpleit Core
//!
//! The domain layer of the Purpleit discussion board.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod time;

pub use error::DomainError;
