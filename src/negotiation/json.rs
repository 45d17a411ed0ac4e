use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::http::response::StatusCode;
use crate::negotiation::processor::{
    AjaxResponder, ContentTypeSettable, ResponseProcessor, ResponseSink, write_with_newline,
};

pub const DEFAULT_JSON_CONTENT_TYPE: &str = "application/json";

/// Renders serializable models as JSON.
///
/// Accepts `application/json`, `application/json-*` variants and any
/// `+json` structured syntax suffix.
#[derive(Debug, Clone)]
pub struct JsonProcessor {
    /// `None` writes dense JSON
    indent: Option<String>,
    content_type: String,
    ajax: bool,
}

impl JsonProcessor {
    /// Dense output, no indentation.
    pub fn new() -> Self {
        Self {
            indent: None,
            content_type: DEFAULT_JSON_CONTENT_TYPE.to_string(),
            ajax: false,
        }
    }

    /// Pretty output using `indent` per nesting level.
    pub fn indented(indent: impl Into<String>) -> Self {
        Self {
            indent: Some(indent.into()),
            ..Self::new()
        }
    }

    pub fn indented_2_spaces() -> Self {
        Self::indented("  ")
    }

    /// Marks this processor as the one that answers Ajax requests.
    pub fn ajax_responder(mut self, ajax: bool) -> Self {
        self.ajax = ajax;
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    fn encode<M: Serialize + ?Sized>(&self, model: &M) -> anyhow::Result<Vec<u8>> {
        match &self.indent {
            None => Ok(serde_json::to_vec(model)?),
            Some(indent) => {
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                model.serialize(&mut serializer)?;
                Ok(buf)
            }
        }
    }
}

impl Default for JsonProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeSettable for JsonProcessor {
    fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl AjaxResponder for JsonProcessor {
    fn is_ajax_responder(&self) -> bool {
        self.ajax
    }
}

impl<M: Serialize + ?Sized> ResponseProcessor<M> for JsonProcessor {
    fn can_process(&self, media_range: &str) -> bool {
        media_range.eq_ignore_ascii_case("application/json")
            || media_range.starts_with("application/json-")
            || media_range.ends_with("+json")
    }

    fn process(&self, sink: &mut dyn ResponseSink, model: Option<&M>) -> anyhow::Result<()> {
        let Some(model) = model else {
            sink.set_status(StatusCode::NoContent);
            return Ok(());
        };

        // encode before touching the sink so a failure leaves it untouched
        let body = self.encode(model)?;
        sink.set_header("Content-Type", &self.content_type);
        write_with_newline(sink, &body)
    }

    fn as_ajax_responder(&self) -> Option<&dyn AjaxResponder> {
        Some(self)
    }

    fn name(&self) -> &str {
        "json"
    }
}
