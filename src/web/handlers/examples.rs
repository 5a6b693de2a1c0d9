use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A sample prompt and the score it should roughly earn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub prompt: String,
    pub expected_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleList {
    pub examples: Vec<Example>,
}

const EXAMPLES: &[(&str, &str, u8)] = &[
    ("Too Vague", "Tell me about Paris", 4),
    (
        "Better",
        "Write a 500-word travel guide for Paris focusing on must-see attractions for first-time visitors",
        7,
    ),
    (
        "Excellent",
        "You are a travel guide writer. Create a 500-word guide for first-time visitors to Paris. Include: 1) Top 5 must-see attractions with brief descriptions, 2) Best time to visit, 3) Getting around the city tips. Use an engaging, friendly tone.",
        9,
    ),
];

/// The fixed showcase list.
pub fn examples() -> ExampleList {
    ExampleList {
        examples: EXAMPLES
            .iter()
            .map(|(title, prompt, expected_score)| Example {
                title: title.to_string(),
                prompt: prompt.to_string(),
                expected_score: *expected_score,
            })
            .collect(),
    }
}

/// GET /examples
pub async fn list_examples() -> Json<ExampleList> {
    debug!("returning example prompts");
    Json(examples())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_examples_in_ascending_quality() {
        let list = examples();
        assert_eq!(list.examples.len(), 3);
        let scores: Vec<u8> = list.examples.iter().map(|e| e.expected_score).collect();
        assert_eq!(scores, vec![4, 7, 9]);
        assert_eq!(list.examples[0].title, "Too Vague");
        assert_eq!(list.examples[0].prompt, "Tell me about Paris");
    }

    #[test]
    fn examples_fit_request_bounds() {
        for example in examples().examples {
            let chars = example.prompt.chars().count();
            assert!(chars > 0 && chars <= crate::consts::MAX_PROMPT_CHARS);
        }
    }

    #[test]
    fn examples_are_stable() {
        assert_eq!(examples(), examples());
    }
}
