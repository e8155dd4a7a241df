//! Resource wrappers for the Dr WISE backend API.
//!
//! One module per backend resource. Each operation issues exactly one
//! HTTP request through [`crate::http::ApiClient`], decodes the typed
//! response, and returns [`crate::http::ApiError`] unchanged. Retries,
//! caching, and toasts belong to callers.

pub mod affiliates;
pub mod auth;
pub mod categories;
pub mod leads;
pub mod payments;
pub mod products;
pub mod referral;
pub mod remote_config;
pub mod subscriptions;
pub mod transactions;
pub mod users;
pub mod verification;
pub mod wallet;
