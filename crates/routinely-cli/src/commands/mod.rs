pub mod chat;
pub mod config;
pub mod extract;
pub mod routine;
