// Auth domain models
pub mod auth;
pub mod client;
pub mod jwt;
pub mod principal;
pub mod refresh_token;
pub mod tokens;
pub mod user;

pub use auth::*;
pub use client::*;
pub use jwt::*;
pub use principal::*;
pub use refresh_token::*;
pub use tokens::*;
pub use user::*;
