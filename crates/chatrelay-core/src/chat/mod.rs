//! Chat relay: history normalization and reply extraction.
//!
//! - `history`: trailing-window selection, welcome-banner drop, role mapping
//! - `replies`: user-facing reply texts
//! - `service`: `RelayService`, which calls the provider and classifies the reply

pub mod history;
pub mod replies;
pub mod service;
