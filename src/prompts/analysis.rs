const INTRO: &str = "You are an expert prompt engineering analyst trained on best practices from promptingguide.ai. Your task is to analyze user prompts and provide actionable feedback.";
const CRITERIA_HEADER: &str = "For each prompt, evaluate:";

/// (heading, bullet points) for each evaluation area.
const CRITERIA: &[(&str, &[&str])] = &[
    (
        "Structure Analysis",
        &[
            "Clarity of instructions",
            "Presence of context",
            "Use of examples",
            "Overall organization",
        ],
    ),
    (
        "Technique Identification",
        &[
            "Zero-shot: Direct instruction without examples",
            "Few-shot: Instruction with examples",
            "Chain-of-thought: Step-by-step reasoning request",
            "Other patterns",
        ],
    ),
    (
        "Common Issues",
        &[
            "Ambiguous instructions",
            "Missing context",
            "Overly complex phrasing",
            "Lack of output format specification",
        ],
    ),
    (
        "Scoring Rubric (1-10)",
        &[
            "1-3: Major issues, unclear intent",
            "4-6: Functional but needs improvement",
            "7-9: Good prompt with minor improvements",
            "10: Excellent, follows best practices",
        ],
    ),
];

const FORMAT_HEADER: &str =
    "Provide your analysis in this JSON format and ONLY JSON, no other text:";
const RESPONSE_FORMAT: &str = r#"{
  "score": <number 1-10>,
  "technique": "<identified technique>",
  "strengths": ["<strength1>", "<strength2>"],
  "issues": ["<issue1>", "<issue2>"],
  "suggestions": [
    {
      "issue": "<what to fix>",
      "suggestion": "<how to fix it>",
      "example": "<improved version>"
    }
  ]
}"#;
const CLOSING: &str =
    "Focus on actionable feedback. Be encouraging but honest. Output ONLY valid JSON.";

/// The fixed rubric sent as the system instruction on every analysis call.
pub fn build_analysis_system_prompt() -> String {
    let criteria = CRITERIA
        .iter()
        .enumerate()
        .map(|(i, (heading, points))| {
            let bullets = points
                .iter()
                .map(|p| format!("   - {}", p))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}. **{}**\n{}", i + 1, heading, bullets)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{INTRO}\n\n{CRITERIA_HEADER}\n\n{criteria}\n\n{FORMAT_HEADER}\n{RESPONSE_FORMAT}\n\n{CLOSING}"
    )
}

/// Wrap the caller's prompt as the single user turn.
pub fn build_user_message(prompt: &str) -> String {
    format!("Analyze this prompt: {prompt}")
}
