use negotiator::negotiation::accept::{
    PARAMETERED_MEDIA_RANGE_WEIGHT, STAR_STAR_MEDIA_RANGE_WEIGHT, TYPE_STAR_MEDIA_RANGE_WEIGHT,
    TYPE_SUBTYPE_MEDIA_RANGE_WEIGHT, parse_media_ranges,
};
use negotiator::negotiation::WeightedValue;

fn ranked(header: &str) -> Vec<(String, f64)> {
    parse_media_ranges(header)
        .into_iter()
        .map(|WeightedValue { value, weight }| (value, weight))
        .collect()
}

fn expect(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs.iter().map(|(v, w)| (v.to_string(), *w)).collect()
}

#[test]
fn test_single_range_defaults_by_specificity() {
    let cases = [
        ("text/html;level=1", PARAMETERED_MEDIA_RANGE_WEIGHT),
        ("text/html", TYPE_SUBTYPE_MEDIA_RANGE_WEIGHT),
        ("text/*", TYPE_STAR_MEDIA_RANGE_WEIGHT),
        ("*/*", STAR_STAR_MEDIA_RANGE_WEIGHT),
        ("html", 0.0),
    ];

    for (header, weight) in cases {
        assert_eq!(ranked(header), expect(&[(header, weight)]), "header {header}");
    }
}

#[test]
fn test_explicit_quality() {
    assert_eq!(ranked("application/json;q=0.9"), expect(&[("application/json", 0.9)]));
    assert_eq!(
        ranked("application/xml;q=1, application/json;q=0.9"),
        expect(&[("application/xml", 1.0), ("application/json", 0.9)])
    );
}

#[test]
fn test_reorders_by_weight_descending() {
    assert_eq!(
        ranked("application/json;q=0.8, application/xml"),
        expect(&[("application/xml", 0.9), ("application/json", 0.8)])
    );
}

#[test]
fn test_preserves_case_of_media_range() {
    assert_eq!(ranked("application/CEA"), expect(&[("application/CEA", 0.9)]));
}

#[test]
fn test_invalid_quality_defaults_to_one() {
    assert_eq!(ranked("text/html;q=blah"), expect(&[("text/html", 1.0)]));
}

#[test]
fn test_keeps_accept_extensions_in_order() {
    assert_eq!(
        ranked("text/html;q=0.5;a=1;B=Two"),
        expect(&[("text/html;a=1;B=Two", 0.5)])
    );
}

#[test]
fn test_precedence_without_quality() {
    assert_eq!(
        ranked("text/*, text/html, text/html;level=1, */*"),
        expect(&[
            ("text/html;level=1", 1.0),
            ("text/html", 0.9),
            ("text/*", 0.8),
            ("*/*", 0.7),
        ])
    );
}

#[test]
fn test_precedence_with_quality() {
    assert_eq!(
        ranked("text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5"),
        expect(&[
            ("text/html;level=1", 1.0),
            ("text/html", 0.7),
            ("*/*", 0.5),
            ("text/html;level=2", 0.4),
            ("text/*", 0.3),
        ])
    );
}

#[test]
fn test_precedence_rfc7231_flowed_example() {
    assert_eq!(
        ranked("text/*, text/plain, text/plain;format=flowed, */*"),
        expect(&[
            ("text/plain;format=flowed", 1.0),
            ("text/plain", 0.9),
            ("text/*", 0.8),
            ("*/*", 0.7),
        ])
    );
}

#[test]
fn test_precedence_with_loose_whitespace_and_upper_q() {
    assert_eq!(
        ranked("text/* ; q=0.3, text/html ; Q=0.7, text/html;level=1, text/html;level=2; q=0.4, */*; q=0.5"),
        expect(&[
            ("text/html;level=1", 1.0),
            ("text/html", 0.7),
            ("*/*", 0.5),
            ("text/html;level=2", 0.4),
            ("text/*", 0.3),
        ])
    );
}

#[test]
fn test_equal_weights_keep_header_order() {
    assert_eq!(
        ranked("text/html;level=2, application/json, text/html;level=1, application/xml"),
        expect(&[
            ("text/html;level=2", 1.0),
            ("text/html;level=1", 1.0),
            ("application/json", 0.9),
            ("application/xml", 0.9),
        ])
    );
}

#[test]
fn test_weights_always_in_unit_interval() {
    let headers = [
        "text/html;q=7",
        "text/html;q=-0.5",
        "text/html;q=",
        "text/html;q=1e400",
        ";;;",
        "*",
        ",",
    ];

    for header in headers {
        for range in parse_media_ranges(header) {
            assert!(
                range.weight.is_finite() && (0.0..=1.0).contains(&range.weight),
                "header {header} gave {range:?}"
            );
        }
    }
}

#[test]
fn test_reparsing_values_yields_same_tokens() {
    let header = "text/* ; q=0.3, text/html;level=2; q=0.4, application/json, */*;q=0.1";
    let first: Vec<String> = parse_media_ranges(header).into_iter().map(|r| r.value).collect();

    let reparsed: Vec<String> = first
        .iter()
        .flat_map(|v| parse_media_ranges(v))
        .map(|r| r.value)
        .collect();

    let mut a = first.clone();
    let mut b = reparsed;
    a.sort();
    b.sort();
    assert_eq!(a, b);
}
