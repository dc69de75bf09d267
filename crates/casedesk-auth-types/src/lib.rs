//! Token types shared between the auth service (issuer) and the UI layer
//! (which re-validates the bearer token on each privileged operation).

pub mod token;
