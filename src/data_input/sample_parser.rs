// src/data_input/sample_parser.rs

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::data_input::sample::Sample;
use crate::error::ParseError;

/// Signed decimal float with optional fraction and exponent, or a
/// non-finite value: `NaN`, `inf` / `Infinity` in any case, or the `∞`
/// symbol that culture-aware float formatting produces.
const NUMBER_PATTERN: &str =
    r"[+-]?(?:(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?|(?i:inf(?:inity)?|nan)|∞)";

/// Reads a float token, including the `∞` spelling `f64::from_str` rejects.
fn parse_float(text: &str) -> Option<f64> {
    match text.strip_suffix('∞') {
        Some("") | Some("+") => Some(f64::INFINITY),
        Some("-") => Some(f64::NEG_INFINITY),
        Some(_) => None,
        None => text.parse().ok(),
    }
}

/// `(x, y, z)[, (px, py, pz)], metric[, confidence]`
static SAMPLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let n = NUMBER_PATTERN;
    let pattern = format!(
        r"^\s*\(\s*(?P<x>{n})\s*,\s*(?P<y>{n})\s*,\s*(?P<z>{n})\s*\)(?:\s*,\s*\(\s*(?P<px>{n})\s*,\s*(?P<py>{n})\s*,\s*(?P<pz>{n})\s*\))?\s*,\s*(?P<metric>{n})(?:\s*,\s*(?P<confidence>{n}))?\s*$"
    );
    Regex::new(&pattern).expect("sample line pattern is valid")
});

fn number(captures: &Captures<'_>, field: &'static str) -> Result<f64, ParseError> {
    let text = captures
        .name(field)
        .map(|m| m.as_str())
        .ok_or_else(|| ParseError::Layout(captures[0].to_string()))?;
    parse_float(text).ok_or_else(|| ParseError::Number {
        field,
        text: text.to_string(),
    })
}

fn optional_number(
    captures: &Captures<'_>,
    field: &'static str,
) -> Result<Option<f64>, ParseError> {
    match captures.name(field) {
        Some(_) => number(captures, field).map(Some),
        None => Ok(None),
    }
}

/// Parses one line of a tracking log into a `Sample`.
///
/// The first tuple is the sample position. A second tuple, when present, is
/// the predicted position. The trailing one or two numbers are the metric and
/// the optional confidence.
pub fn parse_line(line: &str) -> Result<Sample, ParseError> {
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let captures = SAMPLE_LINE
        .captures(line)
        .ok_or_else(|| ParseError::Layout(line.trim().to_string()))?;

    let position = [
        number(&captures, "x")?,
        number(&captures, "y")?,
        number(&captures, "z")?,
    ];

    let prediction = match (
        optional_number(&captures, "px")?,
        optional_number(&captures, "py")?,
        optional_number(&captures, "pz")?,
    ) {
        (Some(px), Some(py), Some(pz)) => Some([px, py, pz]),
        _ => None,
    };

    Ok(Sample {
        position,
        prediction,
        metric: number(&captures, "metric")?,
        confidence: optional_number(&captures, "confidence")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_with_confidence() {
        let sample = parse_line("(1.0, 2.0, 3.0), 4.5, 0.9").unwrap();
        assert_eq!(sample.position, [1.0, 2.0, 3.0]);
        assert_eq!(sample.metric, 4.5);
        assert_eq!(sample.confidence, Some(0.9));
        assert_eq!(sample.prediction, None);
    }

    #[test]
    fn test_parse_without_confidence() {
        let sample = parse_line("(1.0, 2.0, 3.0), 4.5").unwrap();
        assert_eq!(sample.position, [1.0, 2.0, 3.0]);
        assert_eq!(sample.metric, 4.5);
        assert_eq!(sample.confidence, None);
    }

    #[test]
    fn test_parse_negative_and_exponent() {
        let sample = parse_line("(-1.0, 2.0e3, 0.0), -5.0").unwrap();
        assert_eq!(sample.position, [-1.0, 2000.0, 0.0]);
        assert_eq!(sample.metric, -5.0);

        let sample = parse_line("(+.5, 1E-05, 7), 3.").unwrap();
        assert_relative_eq!(sample.position[0], 0.5);
        assert_relative_eq!(sample.position[1], 1e-5);
        assert_relative_eq!(sample.position[2], 7.0);
        assert_relative_eq!(sample.metric, 3.0);
    }

    #[test]
    fn test_parse_simulator_error_line() {
        // Target, prediction, squared error, confidence.
        let line = "(0.25, -0.5, 0), (0.2489, -0.5013, 0), 2.9E-06, 0.87";
        let sample = parse_line(line).unwrap();
        assert_eq!(sample.position, [0.25, -0.5, 0.0]);
        assert_eq!(sample.prediction, Some([0.2489, -0.5013, 0.0]));
        assert_relative_eq!(sample.metric, 2.9e-6);
        assert_eq!(sample.confidence, Some(0.87));
    }

    #[test]
    fn test_parse_non_finite_values() {
        let sample = parse_line("(1, 2, 3), NaN, Infinity").unwrap();
        assert!(sample.metric.is_nan());
        assert_eq!(sample.confidence, Some(f64::INFINITY));

        let sample = parse_line("(1, 2, 3), -inf").unwrap();
        assert_eq!(sample.metric, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_infinity_symbol() {
        let sample = parse_line("(0.5, -0.25, 0), (∞, 0, -∞), ∞, +∞").unwrap();
        assert_eq!(sample.prediction, Some([f64::INFINITY, 0.0, f64::NEG_INFINITY]));
        assert_eq!(sample.metric, f64::INFINITY);
        assert_eq!(sample.confidence, Some(f64::INFINITY));

        assert!(matches!(
            parse_line("(1, 2, 3), 1∞"),
            Err(ParseError::Layout(_))
        ));
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let sample = parse_line("  (1,2 ,  3),4.5 ,0.9\r").unwrap();
        assert_eq!(sample.position, [1.0, 2.0, 3.0]);
        assert_eq!(sample.metric, 4.5);
        assert_eq!(sample.confidence, Some(0.9));
    }

    #[test]
    fn test_missing_coordinate_is_reported() {
        let err = parse_line("(1.0, 2.0), 4.5").unwrap_err();
        assert_eq!(err, ParseError::Layout("(1.0, 2.0), 4.5".to_string()));
    }

    #[test]
    fn test_malformed_lines_are_reported() {
        let bad_lines = [
            "(1.0, abc, 3.0), 4.5",
            "(1.0, 2.0, 3.0)",
            "(1.0, 2.0, 3.0), 4.5, 0.9, 7.0",
            "1.0, 2.0, 3.0, 4.5",
            "(1.0, 2.0, 3.0, 4.0), 4.5",
            "(1.0, 2.0, 3.0), (1.0, 2.0), 4.5",
            "(1,5, 2, 3), x",
        ];
        for line in bad_lines {
            assert!(
                matches!(parse_line(line), Err(ParseError::Layout(_))),
                "expected a layout error for '{line}'"
            );
        }
    }

    #[test]
    fn test_blank_line_is_empty_error() {
        assert_eq!(parse_line(""), Err(ParseError::Empty));
        assert_eq!(parse_line("   \t"), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let line = "(0.125, -7.5, 3e2), 0.001, 0.5";
        let first = parse_line(line).unwrap();
        for _ in 0..5 {
            assert_eq!(parse_line(line).unwrap(), first);
        }
    }

    #[test]
    fn test_format_then_parse_reproduces_values() {
        let samples = [
            Sample::new([1.0, 2.0, 3.0], 4.5).with_confidence(0.9),
            Sample::new([-0.123456789, 9.87e-12, 1e21], -5.0),
            Sample::new([0.3, -0.7, 0.0], 1.0 / 3.0).with_prediction([0.31, -0.69, 0.0]),
        ];
        for sample in samples {
            let reparsed = parse_line(&sample.to_string()).unwrap();
            assert_eq!(reparsed.prediction.is_some(), sample.prediction.is_some());
            assert_eq!(reparsed.confidence.is_some(), sample.confidence.is_some());
            for axis in 0..3 {
                assert_relative_eq!(reparsed.position[axis], sample.position[axis]);
            }
            assert_relative_eq!(reparsed.metric, sample.metric);
        }
    }
}

// src/data_input/sample_parser.rs
