use std::fmt;

use serde::Serialize;
use tracing::{debug, error};

use crate::config::{Config, ConfigError};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::negotiation::{NegotiationError, Negotiator};

/// The model every request renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Greeting {
    pub message: String,
    pub path: String,
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.path)
    }
}

/// Turns requests into negotiated responses.
pub struct Handler {
    negotiator: Negotiator<Greeting>,
    greeting: String,
}

impl Handler {
    pub fn new(negotiator: Negotiator<Greeting>, greeting: impl Into<String>) -> Self {
        Self {
            negotiator,
            greeting: greeting.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(cfg.build_negotiator()?, cfg.server.greeting.clone()))
    }

    /// GET and HEAD are negotiated; anything else is 405. A processor
    /// failure becomes a 500, a 406 goes out with an empty body.
    pub fn handle(&self, req: &Request) -> Response {
        if !req.method.is_read() {
            return Response::method_not_allowed();
        }

        let model = Greeting {
            message: self.greeting.clone(),
            path: req.path.clone(),
        };

        let mut response = Response::new(StatusCode::Ok);
        match self.negotiator.negotiate_request(&mut response, req, Some(&model)) {
            Ok(()) => {}
            Err(NegotiationError::NotAcceptable) => {
                debug!(path = %req.path, accept = ?req.accept(), "Responding 406");
            }
            Err(e) => {
                error!(path = %req.path, error = %e, "Failed to render response");
                response = Response::internal_error();
            }
        }

        response.headers.insert("Vary".to_string(), "Accept".to_string());

        if req.method == Method::HEAD {
            response.body.clear();
        }

        response
    }
}
