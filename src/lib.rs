// Variant Console - terminal client for a variant annotation job server

pub mod client;
pub mod config;
pub mod models;
pub mod state;
pub mod tui; // Terminal User Interface
pub mod types;

// Re-exports for convenience
pub use client::ApiClient;
pub use config::Config;
pub use state::ConsoleState;
