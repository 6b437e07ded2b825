//! Core: configuration, state, server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, ConfigError};
pub use server::{Server, build_app};
pub use state::ServerState;
