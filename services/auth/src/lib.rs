//! Authentication subsystem for the Casedesk case-intake manager.
//!
//! Email-domain-gated registration with emailed verification codes, password
//! and one-time-PIN login, JWT bearer tokens, and flat JSON file persistence.
//! The UI layer talks to [`api::AuthService`] and gets back explicit
//! success-flag + message responses; no errors cross that boundary.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;
pub mod usecase;
