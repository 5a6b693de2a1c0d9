//! Turns the provider's freeform text into an [`AnalysisResult`].
//!
//! Three stages, each with its own failure: [`extract_json`] finds the
//! candidate object, `serde_json` parses it, [`validate`] checks the schema.
//! All of it is pure.

use serde_json::{Map, Value};
use thiserror::Error;

use super::{AnalysisResult, Suggestion};

const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 10;

/// A schema violation, naming the offending field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("analysis must be a JSON object")]
    NotAnObject,

    #[error("field `{0}` is required")]
    Missing(String),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("field `score` must be between 1 and 10 (got {0})")]
    ScoreOutOfRange(String),
}

/// Slice from the first `{` to the last `}` inclusive. `None` when there is
/// no `{`, or no `}` after it.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Check a parsed value against the result schema. Unknown keys are ignored.
pub fn validate(value: &Value) -> Result<AnalysisResult, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

    Ok(AnalysisResult {
        score: score(obj)?,
        technique: string(obj, "technique", "technique")?,
        strengths: string_list(obj, "strengths")?,
        issues: string_list(obj, "issues")?,
        suggestions: suggestions(obj)?,
    })
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, ValidationError> {
    obj.get(key)
        .ok_or_else(|| ValidationError::Missing(path.to_string()))
}

fn score(obj: &Map<String, Value>) -> Result<u8, ValidationError> {
    let wrong_type = || ValidationError::WrongType {
        field: "score".to_string(),
        expected: "an integer",
    };

    let number = match required(obj, "score", "score")? {
        Value::Number(n) => n,
        _ => return Err(wrong_type()),
    };

    // 7.0 is accepted as 7; 7.5 is not an integer.
    let score = if let Some(i) = number.as_i64() {
        i
    } else if number.is_u64() {
        return Err(ValidationError::ScoreOutOfRange(number.to_string()));
    } else {
        match number.as_f64() {
            Some(f) if f.fract() != 0.0 => return Err(wrong_type()),
            Some(f) if (MIN_SCORE as f64..=MAX_SCORE as f64).contains(&f) => f as i64,
            Some(_) => return Err(ValidationError::ScoreOutOfRange(number.to_string())),
            None => return Err(wrong_type()),
        }
    };

    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ValidationError::ScoreOutOfRange(number.to_string()));
    }
    Ok(score as u8)
}

fn string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String, ValidationError> {
    required(obj, key, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::WrongType {
            field: path.to_string(),
            expected: "a string",
        })
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ValidationError> {
    let items = required(obj, key, key)?
        .as_array()
        .ok_or_else(|| ValidationError::WrongType {
            field: key.to_string(),
            expected: "an array of strings",
        })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::WrongType {
                    field: format!("{key}[{i}]"),
                    expected: "a string",
                })
        })
        .collect()
}

fn suggestions(obj: &Map<String, Value>) -> Result<Vec<Suggestion>, ValidationError> {
    let items = required(obj, "suggestions", "suggestions")?
        .as_array()
        .ok_or_else(|| ValidationError::WrongType {
            field: "suggestions".to_string(),
            expected: "an array of objects",
        })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("suggestions[{i}]");
            let entry = item.as_object().ok_or_else(|| ValidationError::WrongType {
                field: path.clone(),
                expected: "an object",
            })?;

            let example = match entry.get("example") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(_) => {
                    return Err(ValidationError::WrongType {
                        field: format!("{path}.example"),
                        expected: "a string or null",
                    });
                }
            };

            Ok(Suggestion {
                issue: string(entry, "issue", &format!("{path}.issue"))?,
                suggestion: string(entry, "suggestion", &format!("{path}.suggestion"))?,
                example,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "score": 7,
            "technique": "Zero-shot",
            "strengths": ["clear goal"],
            "issues": ["no format"],
            "suggestions": [
                {"issue": "no format", "suggestion": "ask for a list", "example": "List 5 ..."},
                {"issue": "no audience", "suggestion": "name the reader"}
            ]
        })
    }

    fn with(key: &str, value: Value) -> Value {
        let mut v = valid();
        v[key] = value;
        v
    }

    fn without(key: &str) -> Value {
        let mut v = valid();
        v.as_object_mut().unwrap().remove(key);
        v
    }

    // --- extract_json ---

    #[test]
    fn extract_plain_object() {
        assert_eq!(extract_json(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn extract_strips_surrounding_prose() {
        let text = r#"Here is the result: {"score":7,"technique":"x"} Thanks!"#;
        assert_eq!(extract_json(text), Some(r#"{"score":7,"technique":"x"}"#));
    }

    #[test]
    fn extract_spans_first_open_to_last_close() {
        let text = r#"pre {"a": {"b": 1}} mid {"c": 2} post"#;
        assert_eq!(extract_json(text), Some(r#"{"a": {"b": 1}} mid {"c": 2}"#));
    }

    #[test]
    fn extract_from_markdown_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(text), Some("{\"a\": 1}"));
    }

    #[test]
    fn extract_none_without_open_brace() {
        assert_eq!(extract_json("no json here }"), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn extract_none_without_close_after_open() {
        assert_eq!(extract_json("{ never closed"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    // --- validate ---

    #[test]
    fn validate_accepts_full_payload() {
        let result = validate(&valid()).unwrap();
        assert_eq!(result.score, 7);
        assert_eq!(result.technique, "Zero-shot");
        assert_eq!(result.strengths, vec!["clear goal"]);
        assert_eq!(result.issues, vec!["no format"]);
        assert_eq!(result.suggestions.len(), 2);
        assert_eq!(result.suggestions[0].example.as_deref(), Some("List 5 ..."));
        assert_eq!(result.suggestions[1].example, None);
    }

    #[test]
    fn validate_accepts_empty_lists() {
        let mut v = valid();
        v["strengths"] = json!([]);
        v["issues"] = json!([]);
        v["suggestions"] = json!([]);
        let result = validate(&v).unwrap();
        assert!(result.strengths.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn validate_ignores_unknown_fields() {
        assert!(validate(&with("confidence", json!(0.9))).is_ok());
    }

    #[test]
    fn validate_score_bounds() {
        assert_eq!(validate(&with("score", json!(1))).unwrap().score, 1);
        assert_eq!(validate(&with("score", json!(10))).unwrap().score, 10);
        assert_eq!(
            validate(&with("score", json!(0))).unwrap_err(),
            ValidationError::ScoreOutOfRange("0".to_string())
        );
        assert_eq!(
            validate(&with("score", json!(11))).unwrap_err(),
            ValidationError::ScoreOutOfRange("11".to_string())
        );
        assert!(matches!(
            validate(&with("score", json!(-3))).unwrap_err(),
            ValidationError::ScoreOutOfRange(_)
        ));
        assert!(matches!(
            validate(&with("score", json!(u64::MAX))).unwrap_err(),
            ValidationError::ScoreOutOfRange(_)
        ));
    }

    #[test]
    fn validate_score_missing() {
        assert_eq!(
            validate(&without("score")).unwrap_err(),
            ValidationError::Missing("score".to_string())
        );
    }

    #[test]
    fn validate_score_non_integer() {
        assert!(matches!(
            validate(&with("score", json!(7.5))).unwrap_err(),
            ValidationError::WrongType { ref field, .. } if field == "score"
        ));
        assert!(matches!(
            validate(&with("score", json!("7"))).unwrap_err(),
            ValidationError::WrongType { ref field, .. } if field == "score"
        ));
    }

    #[test]
    fn validate_score_whole_float_accepted() {
        assert_eq!(validate(&with("score", json!(8.0))).unwrap().score, 8);
    }

    #[test]
    fn validate_score_huge_whole_float_out_of_range() {
        for huge in [1e300, -1e300, 11.0, 0.0] {
            assert!(
                matches!(
                    validate(&with("score", json!(huge))).unwrap_err(),
                    ValidationError::ScoreOutOfRange(_)
                ),
                "{huge}"
            );
        }
    }

    #[test]
    fn validate_names_missing_field() {
        for key in ["technique", "strengths", "issues", "suggestions"] {
            assert_eq!(
                validate(&without(key)).unwrap_err(),
                ValidationError::Missing(key.to_string())
            );
        }
    }

    #[test]
    fn validate_wrong_list_types() {
        let err = validate(&with("strengths", json!("not a list"))).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { ref field, .. } if field == "strengths"));

        let err = validate(&with("issues", json!(["ok", 3]))).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { ref field, .. } if field == "issues[1]"));
    }

    #[test]
    fn validate_technique_must_be_string() {
        let err = validate(&with("technique", json!(null))).unwrap_err();
        assert!(err.to_string().contains("technique"));
    }

    #[test]
    fn validate_suggestion_fields() {
        let err = validate(&with("suggestions", json!([{"suggestion": "x"}]))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing("suggestions[0].issue".to_string())
        );

        let err = validate(&with(
            "suggestions",
            json!([{"issue": "a", "suggestion": "b"}, {"issue": "a"}]),
        ))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing("suggestions[1].suggestion".to_string())
        );

        let err = validate(&with("suggestions", json!(["just text"]))).unwrap_err();
        assert!(err.to_string().contains("suggestions[0]"));
    }

    #[test]
    fn validate_suggestion_example_types() {
        let v = with(
            "suggestions",
            json!([{"issue": "a", "suggestion": "b", "example": null}]),
        );
        assert_eq!(validate(&v).unwrap().suggestions[0].example, None);

        let v = with(
            "suggestions",
            json!([{"issue": "a", "suggestion": "b", "example": 42}]),
        );
        assert!(validate(&v)
            .unwrap_err()
            .to_string()
            .contains("suggestions[0].example"));
    }

    #[test]
    fn validate_rejects_non_object() {
        assert_eq!(validate(&json!([1, 2])).unwrap_err(), ValidationError::NotAnObject);
    }

    #[test]
    fn validate_is_pure() {
        let v = with("score", json!(11));
        assert_eq!(validate(&v), validate(&v));
        assert_eq!(validate(&valid()), validate(&valid()));
    }
}
