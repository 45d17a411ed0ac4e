//! Accept header parsing
//!
//! Turns a raw `Accept` header into media ranges ranked by weight. Ranges
//! without an explicit quality get a default weight from their specificity,
//! so `text/html;level=1` outranks `text/html`, which outranks `text/*`,
//! which outranks `*/*` (RFC 7231 §5.3.2).

use crate::negotiation::weighted::{WeightedValue, sort_by_weight};

/// Default weight of a range carrying an accept-extension, e.g. `text/html;level=1`.
pub const PARAMETERED_MEDIA_RANGE_WEIGHT: f64 = 1.0;
/// Default weight of a concrete `type/subtype` range.
pub const TYPE_SUBTYPE_MEDIA_RANGE_WEIGHT: f64 = 0.9;
/// Default weight of a `type/*` range.
pub const TYPE_STAR_MEDIA_RANGE_WEIGHT: f64 = 0.8;
/// Default weight of `*/*` and of anything else with a wildcard type.
pub const STAR_STAR_MEDIA_RANGE_WEIGHT: f64 = 0.7;
/// Weight of a range that is not `type/subtype` shaped.
pub const MALFORMED_MEDIA_RANGE_WEIGHT: f64 = 0.0;

/// Weight used when a `q` parameter cannot be parsed.
const MALFORMED_QUALITY_WEIGHT: f64 = 1.0;

/// Parsed `Accept` header: media ranges ordered by descending weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
    media_ranges: Vec<WeightedValue>,
}

impl AcceptHeader {
    /// Parses a raw header value.
    ///
    /// # Example
    ///
    /// ```
    /// # use negotiator::negotiation::accept::AcceptHeader;
    /// let accept = AcceptHeader::parse("application/xml;q=0.5, application/json");
    /// assert_eq!(accept.media_ranges()[0].value, "application/json");
    /// assert_eq!(accept.media_ranges()[1].weight, 0.5);
    /// ```
    pub fn parse(header: &str) -> Self {
        Self {
            media_ranges: parse_media_ranges(header),
        }
    }

    pub fn media_ranges(&self) -> &[WeightedValue] {
        &self.media_ranges
    }

    pub fn is_empty(&self) -> bool {
        self.media_ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.media_ranges.len()
    }
}

impl IntoIterator for AcceptHeader {
    type Item = WeightedValue;
    type IntoIter = std::vec::IntoIter<WeightedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.media_ranges.into_iter()
    }
}

/// Parses an `Accept` header into media ranges, heaviest first.
///
/// Never fails: a bad `q` falls back to 1.0 and a malformed range gets
/// weight 0.0. Empty segments are kept with an empty value. Ties keep
/// header order.
pub fn parse_media_ranges(header: &str) -> Vec<WeightedValue> {
    if header.trim().is_empty() {
        return Vec::new();
    }

    let mut ranges: Vec<WeightedValue> = header.split(',').map(parse_media_range).collect();
    sort_by_weight(&mut ranges);
    ranges
}

fn parse_media_range(segment: &str) -> WeightedValue {
    let mut parts = segment.split(';');
    let media_range = parts.next().unwrap_or_default().trim();

    let mut value = media_range.to_string();
    let mut quality = None;
    let mut has_extension = false;

    for param in parts.map(str::trim).filter(|p| !p.is_empty()) {
        match quality_param(param) {
            // last q wins
            Some(raw) => quality = Some(parse_quality(raw)),
            None => {
                value.push(';');
                value.push_str(param);
                has_extension = true;
            }
        }
    }

    let weight = quality.unwrap_or_else(|| default_weight(media_range, has_extension));
    WeightedValue { value, weight }
}

/// Returns the raw value of a `q=` parameter, matching the name case-insensitively.
fn quality_param(param: &str) -> Option<&str> {
    let (name, value) = param.split_once('=')?;
    name.trim().eq_ignore_ascii_case("q").then(|| value.trim())
}

fn parse_quality(raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(q) if q.is_finite() => q.clamp(0.0, 1.0),
        _ => MALFORMED_QUALITY_WEIGHT,
    }
}

/// Weight given to a media range that has no explicit quality.
///
/// # Example
///
/// ```
/// # use negotiator::negotiation::accept::default_weight;
/// assert_eq!(default_weight("text/html", true), 1.0);
/// assert_eq!(default_weight("text/html", false), 0.9);
/// assert_eq!(default_weight("text/*", false), 0.8);
/// assert_eq!(default_weight("*/*", false), 0.7);
/// assert_eq!(default_weight("html", false), 0.0);
/// ```
pub fn default_weight(media_range: &str, has_extension: bool) -> f64 {
    if has_extension {
        return PARAMETERED_MEDIA_RANGE_WEIGHT;
    }

    let mut parts = media_range.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("*"), _, _) => STAR_STAR_MEDIA_RANGE_WEIGHT,
        (Some(t), Some("*"), None) if !t.is_empty() => TYPE_STAR_MEDIA_RANGE_WEIGHT,
        (Some(t), Some(s), None) if !t.is_empty() && !s.is_empty() => {
            TYPE_SUBTYPE_MEDIA_RANGE_WEIGHT
        }
        _ => MALFORMED_MEDIA_RANGE_WEIGHT,
    }
}
