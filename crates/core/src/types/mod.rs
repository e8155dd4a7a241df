//! Core types for the Dr WISE client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credits;
pub mod email;
pub mod id;
pub mod ifsc;
pub mod phone;
pub mod role;
pub mod status;

pub use credits::Credits;
pub use email::{Email, EmailError};
pub use id::*;
pub use ifsc::{IfscCode, IfscError};
pub use phone::{PhoneError, PhoneNumber};
pub use role::Role;
pub use status::*;
