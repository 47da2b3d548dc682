pub mod config;
pub mod errors;
pub mod export;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod session;
pub mod state;
pub mod templates_structs;
