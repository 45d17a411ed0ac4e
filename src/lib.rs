//! negotiator - HTTP content negotiation
//!
//! Ranks `Accept` header media ranges and dispatches to the first response
//! processor that can render them, plus a small HTTP/1.1 server that
//! serves negotiated responses.

pub mod config;
pub mod http;
pub mod negotiation;
pub mod server;
