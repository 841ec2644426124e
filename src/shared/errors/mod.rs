// Shared errors
pub mod auth_error;
pub mod config_error;
pub mod persistence_error;

pub use auth_error::*;
pub use config_error::*;
pub use persistence_error::*;
