//! Dr WISE Core - Shared types library.
//!
//! This crate provides common types used across the Dr WISE client crates:
//! - `client` - Backend API client and session management
//! - `integration-tests` - End-to-end session lifecycle tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere,
//! including inside the mobile shells that embed the SDK.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, validated contact
//!   details, money amounts, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

// Re-exported so downstream crates construct amounts without naming the
// decimal crate themselves.
pub use rust_decimal::Decimal;
