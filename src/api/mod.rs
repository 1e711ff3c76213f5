//! API clients for external services
//!
//! - Castings: casting opportunities and applications on the Cruise TV backend

pub mod castings;

pub use castings::{ApiError, CastingClient, DEFAULT_BASE_URL};
