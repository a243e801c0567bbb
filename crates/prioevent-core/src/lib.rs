//! # prioevent-core
//!
//! Core crate for the priority event emitter. Contains the configuration
//! schemas and the unified error system shared by the emitter and the
//! demo binary.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, EventError};
pub use result::EventResult;
