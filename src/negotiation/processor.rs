//! The contract between the negotiation engine and response formats.
//!
//! A [`ResponseProcessor`] answers two questions: can it render a given media
//! range, and, once chosen, render the model into a [`ResponseSink`].
//! Optional capabilities are exposed through accessor methods that default
//! to "not supported".

use crate::http::response::StatusCode;

/// Where a processor writes its representation.
pub trait ResponseSink {
    fn set_status(&mut self, status: StatusCode);

    /// Sets a header, replacing any previous value with the same name.
    fn set_header(&mut self, name: &str, value: &str);

    /// Appends bytes to the body.
    fn write(&mut self, bytes: &[u8]) -> anyhow::Result<()>;
}

/// A response format the negotiator can dispatch to.
///
/// `M` is the data model type handed to [`process`](Self::process); `None`
/// means there is nothing to render.
pub trait ResponseProcessor<M: ?Sized>: Send + Sync {
    /// Whether this processor can render `media_range`, e.g. `application/json`.
    fn can_process(&self, media_range: &str) -> bool;

    /// Renders `model` into `sink`.
    fn process(&self, sink: &mut dyn ResponseSink, model: Option<&M>) -> anyhow::Result<()>;

    /// Ajax capability, if this processor has one.
    fn as_ajax_responder(&self) -> Option<&dyn AjaxResponder> {
        None
    }

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Lets a processor claim `X-Requested-With: XMLHttpRequest` requests ahead
/// of normal negotiation.
pub trait AjaxResponder {
    fn is_ajax_responder(&self) -> bool;
}

/// Processors whose `Content-Type` header can be overridden.
pub trait ContentTypeSettable: Sized {
    fn with_content_type(self, content_type: impl Into<String>) -> Self;
}

/// Writes `bytes` followed by a newline.
pub fn write_with_newline(sink: &mut dyn ResponseSink, bytes: &[u8]) -> anyhow::Result<()> {
    sink.write(bytes)?;
    sink.write(b"\n")
}
