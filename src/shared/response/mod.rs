// Uniform response envelope
pub mod service_response;

pub use service_response::*;
