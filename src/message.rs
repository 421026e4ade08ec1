//! Inbound score messages, one JSON object per stdin line.

use serde_json::Value;

/// The only message type the handler reacts to; everything else is ignored.
pub const SCORE_RESULT_TYPE: &str = "H5P_SCORE_RESULT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreMessage {
    pub score: u32,
    pub max_score: u32,
}

/// Parse one line of input. Returns `None` for anything that is not a JSON
/// object of the recognized type; malformed lines never fail the caller.
pub fn parse_line(line: &str) -> Option<ScoreMessage> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    let obj = value.as_object()?;
    if obj.get("type").and_then(Value::as_str) != Some(SCORE_RESULT_TYPE) {
        return None;
    }
    Some(ScoreMessage {
        score: coerce(obj.get("score")),
        max_score: coerce(obj.get("maxScore")),
    })
}

/// Lenient numeric coercion: JSON numbers are truncated and saturated into
/// u32, numeric strings parse, and everything else (missing fields, booleans,
/// NaN, negatives) defaults to 0.
fn coerce(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_message_parses() {
        let msg = parse_line(r#"{"type":"H5P_SCORE_RESULT","score":7,"maxScore":10}"#);
        assert_eq!(
            msg,
            Some(ScoreMessage {
                score: 7,
                max_score: 10
            })
        );
    }

    #[test]
    fn unrecognized_type_is_ignored() {
        assert_eq!(
            parse_line(r#"{"type":"H5P_RESIZE","score":7,"maxScore":10}"#),
            None
        );
        assert_eq!(parse_line(r#"{"score":7,"maxScore":10}"#), None);
    }

    #[test]
    fn garbage_lines_are_ignored() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("not json"), None);
        assert_eq!(parse_line("[1,2,3]"), None);
        assert_eq!(parse_line("42"), None);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let msg = parse_line(r#"{"type":"H5P_SCORE_RESULT"}"#).unwrap();
        assert_eq!(msg.score, 0);
        assert_eq!(msg.max_score, 0);
    }

    #[test]
    fn invalid_fields_default_to_zero() {
        let msg =
            parse_line(r#"{"type":"H5P_SCORE_RESULT","score":"abc","maxScore":true}"#).unwrap();
        assert_eq!(msg.score, 0);
        assert_eq!(msg.max_score, 0);
    }

    #[test]
    fn numeric_strings_and_floats_coerce() {
        let msg =
            parse_line(r#"{"type":"H5P_SCORE_RESULT","score":"8","maxScore":10.9}"#).unwrap();
        assert_eq!(msg.score, 8);
        assert_eq!(msg.max_score, 10);
    }

    #[test]
    fn negatives_clamp_to_zero() {
        let msg =
            parse_line(r#"{"type":"H5P_SCORE_RESULT","score":-3,"maxScore":-1.5}"#).unwrap();
        assert_eq!(msg.score, 0);
        assert_eq!(msg.max_score, 0);
    }

    #[test]
    fn huge_numbers_saturate() {
        let msg =
            parse_line(r#"{"type":"H5P_SCORE_RESULT","score":1e12,"maxScore":10}"#).unwrap();
        assert_eq!(msg.score, u32::MAX);
    }
}
