use std::cmp::Ordering;

/// A value paired with a weight between 0.0 and 1.0.
///
/// Produced by the Accept header parser: `value` holds the media range (with
/// any accept-extensions) and `weight` its effective priority.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedValue {
    /// Media range, e.g. `text/html;level=1`
    pub value: String,
    /// Effective priority in `[0.0, 1.0]`
    pub weight: f64,
}

impl WeightedValue {
    pub fn new(value: impl Into<String>, weight: f64) -> Self {
        Self {
            value: value.into(),
            weight,
        }
    }

    /// Orders heavier values first.
    ///
    /// Equal weights compare as `Equal`, so a stable sort keeps their input
    /// order.
    ///
    /// # Example
    ///
    /// ```
    /// # use negotiator::negotiation::weighted::WeightedValue;
    /// let mut values = vec![
    ///     WeightedValue::new("text/*", 0.8),
    ///     WeightedValue::new("text/html", 0.9),
    /// ];
    /// values.sort_by(WeightedValue::cmp_by_weight);
    /// assert_eq!(values[0].value, "text/html");
    /// ```
    pub fn cmp_by_weight(a: &Self, b: &Self) -> Ordering {
        b.weight.total_cmp(&a.weight)
    }

    /// True when the value is the `*/*` wildcard (case-insensitive).
    pub fn is_wildcard(&self) -> bool {
        self.value.eq_ignore_ascii_case("*/*")
    }
}

/// Stable in-place sort, heaviest first.
pub fn sort_by_weight(values: &mut [WeightedValue]) {
    values.sort_by(WeightedValue::cmp_by_weight);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavier_sorts_first() {
        let mut values = vec![
            WeightedValue::new("a", 0.1),
            WeightedValue::new("b", 1.0),
            WeightedValue::new("c", 0.5),
        ];
        sort_by_weight(&mut values);

        let order: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn equal_weights_keep_input_order() {
        let mut values = vec![
            WeightedValue::new("text/html;level=1", 1.0),
            WeightedValue::new("application/json", 0.9),
            WeightedValue::new("text/html;level=2", 1.0),
            WeightedValue::new("text/plain;format=flowed", 1.0),
        ];
        sort_by_weight(&mut values);

        let order: Vec<&str> = values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "text/html;level=1",
                "text/html;level=2",
                "text/plain;format=flowed",
                "application/json",
            ]
        );
    }

    #[test]
    fn wildcard_detection_ignores_case() {
        assert!(WeightedValue::new("*/*", 0.7).is_wildcard());
        assert!(!WeightedValue::new("text/*", 0.8).is_wildcard());
    }
}
