//! HTTP request handlers shared by every service.

pub mod health;

pub use health::{Health, health_check, readiness};
