//! Auth types shared across the Guestline workspace.
//!
//! Provides JWT validation, the startup-resolved authentication gate, and the
//! `CallerIdentity` extractor.

pub mod identity;
pub mod token;
