//! cruisecast - Cruise TV casting calls in the terminal
//!
//! Browse open castings, apply to them, and manage the listings against the
//! Cruise TV backend, either interactively or from scripts.
//!
//! # Modules
//!
//! - `models` - Casting and application data
//! - `api` - REST client for the casting backend
//! - `form` - Text fields and forms shared by the modals
//! - `views` - Listing, apply and admin view state
//! - `carousel` - Auto-advancing featured strip and its timer
//! - `app` - Screen/overlay state machine
//! - `ui` - Rendering
//! - `cli`, `commands` - Scriptable subcommands
//! - `config`, `logging` - Settings file and tracing setup

pub mod api;
pub mod app;
pub mod carousel;
pub mod cli;
pub mod commands;
pub mod config;
pub mod form;
pub mod logging;
pub mod models;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use api::{ApiError, CastingClient};
pub use app::{App, Effect, Outcome, Overlay, Screen};
pub use models::{ApplicationFields, Casting, CastingFields, CastingId, CastingStatus};
