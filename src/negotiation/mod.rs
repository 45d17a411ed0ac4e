//! HTTP content negotiation.
//!
//! The `Accept` header is parsed into media ranges ranked by weight
//! ([`accept`]), then the [`Negotiator`] walks those ranges against an
//! ordered list of [`ResponseProcessor`]s until one claims the request.
//!
//! ```ignore
//! let negotiator = Negotiator::with_json_and_text(Vec::new());
//! let mut response = Response::new(StatusCode::Ok);
//! negotiator.negotiate_request(&mut response, &request, Some(&user))?;
//! ```

pub mod accept;
pub mod error;
pub mod json;
pub mod negotiator;
pub mod processor;
pub mod text;
pub mod weighted;

pub use accept::{AcceptHeader, parse_media_ranges};
pub use error::NegotiationError;
pub use json::JsonProcessor;
pub use negotiator::{Negotiator, Processors, is_ajax, negotiate, negotiate_default};
pub use processor::{AjaxResponder, ContentTypeSettable, ResponseProcessor, ResponseSink};
pub use text::TextProcessor;
pub use weighted::WeightedValue;
