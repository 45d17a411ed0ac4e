use std::fmt::Display;

use crate::http::response::StatusCode;
use crate::negotiation::processor::{
    AjaxResponder, ContentTypeSettable, ResponseProcessor, ResponseSink, write_with_newline,
};

pub const DEFAULT_TEXT_CONTENT_TYPE: &str = "text/plain";

/// Renders models through their `Display` impl as `text/plain`.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    content_type: String,
    ajax: bool,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self {
            content_type: DEFAULT_TEXT_CONTENT_TYPE.to_string(),
            ajax: false,
        }
    }

    pub fn ajax_responder(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeSettable for TextProcessor {
    fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl AjaxResponder for TextProcessor {
    fn is_ajax_responder(&self) -> bool {
        self.ajax
    }
}

impl<M: Display + ?Sized> ResponseProcessor<M> for TextProcessor {
    fn can_process(&self, media_range: &str) -> bool {
        media_range.eq_ignore_ascii_case("text/plain") || media_range.eq_ignore_ascii_case("text/*")
    }

    fn process(&self, sink: &mut dyn ResponseSink, model: Option<&M>) -> anyhow::Result<()> {
        let Some(model) = model else {
            sink.set_status(StatusCode::NoContent);
            return Ok(());
        };

        sink.set_header("Content-Type", &self.content_type);
        write_with_newline(sink, model.to_string().as_bytes())
    }

    fn as_ajax_responder(&self) -> Option<&dyn AjaxResponder> {
        Some(self)
    }

    fn name(&self) -> &str {
        "text"
    }
}
