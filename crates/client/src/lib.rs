//! Dr WISE client SDK.
//!
//! This crate provides everything a mobile shell embeds to talk to the
//! Dr WISE referral platform: the HTTP adapter, typed resource wrappers,
//! the persisted token store, and the session state container.
//!
//! # Getting started
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use drwise_client::config::ClientConfig;
//! use drwise_client::http::ApiClient;
//! use drwise_client::session::{Session, SessionOptions};
//! use drwise_client::storage::FileTokenStore;
//!
//! # async fn start() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let tokens = Arc::new(FileTokenStore::new(&config.token_dir));
//! let api = ApiClient::new(&config, tokens)?;
//!
//! let session = Session::with_client(&api, SessionOptions::from_config(&config));
//! session.validate_token().await;
//!
//! let tree = drwise_client::routes::RouteTree::for_session(&session.snapshot());
//! # let _ = tree;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod http;
pub mod models;
pub mod routes;
pub mod session;
pub mod storage;
