//! Test utilities for Casedesk services.
//!
//! Provides the throwaway data-directory fixture and token-minting helpers.
//! Import in `#[cfg(test)]` blocks only — never in production code.

pub mod auth;
pub mod fixture;
