pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod release;
pub mod server;
