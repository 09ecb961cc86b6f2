//! Shared HTTP plumbing

pub mod client;

pub use client::HttpClient;
