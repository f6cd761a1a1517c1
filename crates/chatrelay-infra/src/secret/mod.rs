//! Credential sources.
//!
//! - `env`: Environment variable lookup for the provider API key

pub mod env;
