//! `prompt-analyzer smoke`: exercise a running server end to end.

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;

use crate::consts::{MAX_PROMPT_CHARS, preview};

/// Outcome of one check.
#[derive(Debug, Clone)]
pub struct SmokeCheck {
    pub name: String,
    pub passed: bool,
    pub details: String,
}

#[derive(Debug, Clone, Default)]
pub struct SmokeReport {
    pub checks: Vec<SmokeCheck>,
}

impl SmokeReport {
    fn record(&mut self, name: &str, passed: bool, details: impl Into<String>) {
        self.checks.push(SmokeCheck {
            name: name.to_string(),
            passed,
            details: details.into(),
        });
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SmokeCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run every check against `base_url`. `origin` is sent on the CORS preflight.
///
/// Fails only if the server cannot be reached at all.
pub async fn run_checks(base_url: &str, origin: &str) -> Result<SmokeReport> {
    let base = base_url.trim_end_matches('/');
    let client = Client::builder()
        .timeout(Duration::from_secs(180))
        .build()
        .context("failed to build HTTP client")?;

    client
        .get(format!("{base}/health"))
        .timeout(Duration::from_secs(2))
        .send()
        .await
        .with_context(|| format!("server is not running at {base}"))?;

    let mut report = SmokeReport::default();
    check_health(&client, base, &mut report).await;
    check_analyze(&client, base, &mut report).await;
    check_examples(&client, base, &mut report).await;
    check_cors(&client, base, origin, &mut report).await;
    Ok(report)
}

async fn check_health(client: &Client, base: &str, report: &mut SmokeReport) {
    let name = "Health endpoint";
    let resp = match client.get(format!("{base}/health")).send().await {
        Ok(resp) => resp,
        Err(e) => return report.record(name, false, e.to_string()),
    };
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);

    report.record(name, status == StatusCode::OK, format!("status {status}"));
    report.record(
        "Redis status returned",
        body.get("redis").is_some(),
        format!("redis: {}", body["redis"]),
    );
    report.record(
        "Claude status returned",
        body.get("claude").is_some(),
        format!("claude: {}", body["claude"]),
    );
}

async fn check_analyze(client: &Client, base: &str, report: &mut SmokeReport) {
    let too_long = "x".repeat(MAX_PROMPT_CHARS + 1);
    let cases = [
        ("Valid prompt", json!({"prompt": "Tell me about Python programming"}), true),
        ("Empty prompt", json!({"prompt": ""}), false),
        ("Very long prompt", json!({"prompt": too_long}), false),
        ("Missing prompt field", json!({}), false),
        (
            "Special characters",
            json!({"prompt": "Explain this: 🚀 && || <script>alert('test')</script>"}),
            true,
        ),
    ];

    for (name, body, expect_success) in cases {
        let resp = match client.post(format!("{base}/analyze")).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                report.record(name, false, e.to_string());
                continue;
            }
        };
        let status = resp.status();
        let ok = status == StatusCode::OK;
        let details = if ok {
            let data: Value = resp.json().await.unwrap_or(Value::Null);
            format!("Score: {}/10", data["score"])
        } else {
            let text = resp.text().await.unwrap_or_default();
            format!("Status: {status}, Error: {}", preview(&text, 100))
        };
        report.record(name, ok == expect_success, details);
    }
}

async fn check_examples(client: &Client, base: &str, report: &mut SmokeReport) {
    let name = "Examples endpoint";
    let resp = match client.get(format!("{base}/examples")).send().await {
        Ok(resp) => resp,
        Err(e) => return report.record(name, false, e.to_string()),
    };
    let status = resp.status();
    let body: Value = resp.json().await.unwrap_or(Value::Null);
    let count = body["examples"].as_array().map(Vec::len).unwrap_or(0);

    report.record(name, status == StatusCode::OK, format!("status {status}"));
    report.record("Examples returned", count > 0, format!("found {count} examples"));
}

async fn check_cors(client: &Client, base: &str, origin: &str, report: &mut SmokeReport) {
    let name = "CORS headers present";
    let resp = client
        .request(Method::OPTIONS, format!("{base}/analyze"))
        .header("origin", origin)
        .header("access-control-request-method", "POST")
        .send()
        .await;
    match resp {
        Ok(resp) => {
            let allowed = resp
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let details = format!("Allow-Origin: {}", allowed.as_deref().unwrap_or("<none>"));
            report.record(name, allowed.is_some(), details);
        }
        Err(e) => report.record(name, false, e.to_string()),
    }
}

/// Run the checks and print a PASS/FAIL line for each. Returns whether all passed.
pub async fn run(base_url: &str, origin: &str) -> Result<bool> {
    println!("{}", "=".repeat(50));
    println!("Prompt Analyzer smoke test against {base_url}");
    println!("{}", "=".repeat(50));

    let report = run_checks(base_url, origin).await?;
    for check in &report.checks {
        let status = if check.passed { "PASS" } else { "FAIL" };
        println!("[{status}] {}", check.name);
        if !check.details.is_empty() {
            println!("      {}", check.details);
        }
    }

    println!("\n{}", "=".repeat(50));
    println!("Summary: {}/{} checks passed", report.passed(), report.total());
    if report.all_passed() {
        println!("All checks passed!");
    } else {
        println!("Some checks failed. Check the output above.");
    }
    Ok(report.all_passed())
}
