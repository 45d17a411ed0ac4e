use thiserror::Error;

use crate::http::response::StatusCode;

/// Outcome of a negotiation that did not produce a representation.
#[derive(Error, Debug)]
pub enum NegotiationError {
    /// No registered processor accepts any of the requested media ranges.
    #[error("no acceptable representation for the requested media ranges")]
    NotAcceptable,

    /// The chosen processor failed to render the model.
    #[error("response processor failed: {0}")]
    Processor(#[from] anyhow::Error),
}

impl NegotiationError {
    /// HTTP status this outcome maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            NegotiationError::NotAcceptable => StatusCode::NotAcceptable,
            NegotiationError::Processor(_) => StatusCode::InternalServerError,
        }
    }
}
