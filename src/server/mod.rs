//! Demo server: answers every GET/HEAD with a negotiated [`handler::Greeting`].

pub mod handler;
pub mod listener;
