//! Shared test helpers for `attrsync-core` integration tests.
//!
//! These helpers provide an in-memory document store so scenario tests can
//! focus on behaviour instead of boilerplate.

pub mod documents;
