//! Minimal HTTP/1.1 plumbing for the negotiating server.
//!
//! - **`parser`**: parses requests out of a byte buffer
//! - **`request`**: request representation and header lookup
//! - **`response`**: responses, status codes, and the [`ResponseSink`](crate::negotiation::processor::ResponseSink) impl
//! - **`writer`**: serializes and writes responses
//! - **`connection`**: per-connection keep-alive state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received (malformed → 400, then Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Negotiate and render the response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
