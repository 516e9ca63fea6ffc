//! # Signalist Server
//!
//! Wires the auth store, the email dispatcher and the event bus into one
//! axum application.
//!
//! - [`config`]: environment configuration
//! - [`app`]: router composition
//! - [`diagnostics`]: hand-run checks for the mail and event wiring
//! - [`local_bus`]: in-process event delivery when no event API is configured
//! - [`welcome`]: `app/user.created` → welcome email

#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod local_bus;
pub mod welcome;

pub use app::build_router;
pub use config::{Config, ConfigError};
pub use diagnostics::Diagnostics;
pub use local_bus::LocalEventBus;
