//! Infrastructure layer for chatrelay.
//!
//! Contains the implementation of the `ChatProvider` port defined in
//! `chatrelay-core` (the Gemini REST client), the environment credential
//! lookup, and the `chatrelay.toml` loader.

pub mod config;
pub mod llm;
pub mod secret;
