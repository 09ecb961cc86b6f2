//! Autodesk Platform Services adapters
//!
//! - [`auth`]: two-legged OAuth token provider
//! - [`client`]: Data Management folder browsing and tip lookup plus the Docs
//!   custom-attribute batch update, behind the core ports

pub mod auth;
pub mod client;
mod types;

pub use auth::{AccessTokenProvider, ClientCredentialsAuth};
pub use client::ApsClient;
