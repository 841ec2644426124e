// Shared configuration
pub mod auth_config;

pub use auth_config::*;
