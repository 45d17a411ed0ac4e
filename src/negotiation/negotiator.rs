//! Content negotiation engine
//!
//! Ajax requests go to the first processor that claims them. Otherwise the
//! `Accept` header decides:
//!
//! - A request without an `Accept` header accepts any media type, so the
//!   first registered processor answers.
//! - Ranked media ranges are tried in order. `*/*` picks the first
//!   registered processor; any other range picks the first processor whose
//!   `can_process` returns true.
//! - When nothing matches the response is 406 Not Acceptable
//!   (RFC 7231 §5.3.2 lets a server either send 406 or ignore the header;
//!   this engine sends 406).

use std::fmt::Display;

use serde::Serialize;
use tracing::{debug, warn};

use crate::http::request::Request;
use crate::http::response::StatusCode;
use crate::negotiation::accept::AcceptHeader;
use crate::negotiation::error::NegotiationError;
use crate::negotiation::json::JsonProcessor;
use crate::negotiation::processor::{ResponseProcessor, ResponseSink};
use crate::negotiation::text::TextProcessor;

pub const X_REQUESTED_WITH: &str = "X-Requested-With";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Ordered processor list; earlier entries win ties.
pub type Processors<M> = Vec<Box<dyn ResponseProcessor<M>>>;

/// An immutable, ordered set of response processors.
///
/// Build one per model type at startup and share it (e.g. behind an `Arc`);
/// negotiation itself never mutates it.
pub struct Negotiator<M: ?Sized> {
    processors: Processors<M>,
}

impl<M: ?Sized> Negotiator<M> {
    pub fn new(processors: Processors<M>) -> Self {
        Self { processors }
    }

    /// Returns a negotiator with `more` appended after the current processors.
    pub fn add(mut self, more: Processors<M>) -> Self {
        self.processors.extend(more);
        self
    }

    pub fn processors(&self) -> &[Box<dyn ResponseProcessor<M>>] {
        &self.processors
    }

    /// Negotiates on an `Accept` header value alone.
    pub fn negotiate(
        &self,
        sink: &mut dyn ResponseSink,
        accept: &str,
        model: Option<&M>,
    ) -> Result<(), NegotiationError> {
        negotiate(sink, accept, model, &self.processors)
    }

    /// Negotiates with an explicit Ajax flag.
    pub fn negotiate_ajax(
        &self,
        sink: &mut dyn ResponseSink,
        accept: &str,
        is_ajax: bool,
        model: Option<&M>,
    ) -> Result<(), NegotiationError> {
        if is_ajax {
            if let Some((index, processor)) = find_ajax_responder(&self.processors) {
                debug!(processor = processor.name(), index, "Ajax request handled by Ajax responder");
                return run(processor, sink, model);
            }
        }

        negotiate(sink, accept, model, &self.processors)
    }

    /// Negotiates for a parsed request, honouring `Accept` and `X-Requested-With`.
    pub fn negotiate_request(
        &self,
        sink: &mut dyn ResponseSink,
        req: &Request,
        model: Option<&M>,
    ) -> Result<(), NegotiationError> {
        self.negotiate_ajax(sink, req.accept().unwrap_or(""), is_ajax(req), model)
    }
}

impl<M: Serialize + Display + ?Sized> Negotiator<M> {
    /// `extra` processors first, followed by JSON and plain text.
    pub fn with_json_and_text(extra: Processors<M>) -> Self {
        let mut processors = extra;
        processors.push(Box::new(JsonProcessor::new()));
        processors.push(Box::new(TextProcessor::new()));
        Self::new(processors)
    }
}

/// Negotiates `req` against the built-in JSON and plain text processors.
pub fn negotiate_default<M: Serialize + Display + ?Sized>(
    sink: &mut dyn ResponseSink,
    req: &Request,
    model: Option<&M>,
) -> Result<(), NegotiationError> {
    Negotiator::with_json_and_text(Vec::new()).negotiate_request(sink, req, model)
}

/// Selects a processor for `accept` and lets it render `model` into `sink`.
///
/// On `NotAcceptable` the sink's status is set to 406 and nothing is
/// written. Processor errors are returned unchanged.
pub fn negotiate<M: ?Sized>(
    sink: &mut dyn ResponseSink,
    accept: &str,
    model: Option<&M>,
    processors: &[Box<dyn ResponseProcessor<M>>],
) -> Result<(), NegotiationError> {
    let Some(first) = processors.first() else {
        warn!("No response processors registered");
        return not_acceptable(sink);
    };

    let accept = accept.trim();
    if accept.is_empty() {
        debug!(processor = first.name(), "No Accept header, using first processor");
        return run(first.as_ref(), sink, model);
    }

    for range in AcceptHeader::parse(accept) {
        if range.value.is_empty() {
            continue;
        }

        if range.is_wildcard() {
            debug!(
                processor = first.name(),
                weight = range.weight,
                "Wildcard media range, using first processor"
            );
            return run(first.as_ref(), sink, model);
        }

        let matched = processors
            .iter()
            .enumerate()
            .find(|(_, p)| p.can_process(&range.value));

        if let Some((index, processor)) = matched {
            debug!(
                processor = processor.name(),
                index,
                media_range = %range.value,
                weight = range.weight,
                "Media range accepted"
            );
            return run(processor.as_ref(), sink, model);
        }
    }

    warn!(accept, "No processor accepts any requested media range");
    not_acceptable(sink)
}

/// True when the request carries `X-Requested-With: XMLHttpRequest`.
pub fn is_ajax(req: &Request) -> bool {
    req.header(X_REQUESTED_WITH) == Some(XML_HTTP_REQUEST)
}

fn find_ajax_responder<M: ?Sized>(
    processors: &[Box<dyn ResponseProcessor<M>>],
) -> Option<(usize, &dyn ResponseProcessor<M>)> {
    processors
        .iter()
        .enumerate()
        .find(|(_, p)| p.as_ajax_responder().is_some_and(|a| a.is_ajax_responder()))
        .map(|(index, p)| (index, p.as_ref()))
}

fn run<M: ?Sized>(
    processor: &dyn ResponseProcessor<M>,
    sink: &mut dyn ResponseSink,
    model: Option<&M>,
) -> Result<(), NegotiationError> {
    processor.process(sink, model).map_err(|e| {
        warn!(processor = processor.name(), error = %e, "Response processor failed");
        NegotiationError::Processor(e)
    })
}

fn not_acceptable(sink: &mut dyn ResponseSink) -> Result<(), NegotiationError> {
    sink.set_status(StatusCode::NotAcceptable);
    Err(NegotiationError::NotAcceptable)
}
