//! Shared ambient utilities for Guestline services.
//!
//! Provides health handlers, timestamp serialization, request-id middleware,
//! and tracing initialization.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
