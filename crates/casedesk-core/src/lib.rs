//! Shared plumbing for Casedesk services.
//!
//! This crate contains only ambient concerns: tracing initialization and
//! serde timestamp helpers. Domain logic lives in the service crates.

pub mod serde;
pub mod tracing;
