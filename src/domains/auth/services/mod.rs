// Auth domain services
pub mod authentication_service;
pub mod claims_builder;
pub mod password;
pub mod signing_key;
pub mod state;
pub mod token_service;

pub use authentication_service::*;
pub use claims_builder::*;
pub use password::*;
pub use signing_key::*;
pub use state::*;
pub use token_service::*;
