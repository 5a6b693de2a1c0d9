//! `prompt-analyzer check-env`: validate a `.env` file before starting the server.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::usable_api_key;
use crate::consts::{API_KEY_PLACEHOLDER, DEFAULT_REDIS_URL};

const API_KEY_VAR: &str = "CLAUDE_API_KEY";
const REDIS_URL_VAR: &str = "REDIS_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// The variable is not in the file.
    Missing,
    /// Present but blank or still the placeholder.
    Unset,
    Set,
}

/// What was found in the env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvReport {
    pub file_found: bool,
    /// A sibling `.env.example` exists and can be copied.
    pub example_found: bool,
    pub api_key: KeyState,
    pub redis_url: Option<String>,
}

impl EnvReport {
    pub fn is_ready(&self) -> bool {
        self.file_found && self.api_key == KeyState::Set
    }
}

/// Read `path` without touching the process environment.
pub fn inspect(path: &Path) -> Result<EnvReport> {
    let example_found = path.with_file_name(".env.example").exists();

    if !path.exists() {
        return Ok(EnvReport {
            file_found: false,
            example_found,
            api_key: KeyState::Missing,
            redis_url: None,
        });
    }

    let mut api_key = KeyState::Missing;
    let mut redis_url = None;

    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    for entry in entries {
        let (key, value) =
            entry.with_context(|| format!("failed to parse {}", path.display()))?;
        match key.as_str() {
            API_KEY_VAR => {
                api_key = if usable_api_key(Some(&value)).is_some() {
                    KeyState::Set
                } else {
                    KeyState::Unset
                };
            }
            REDIS_URL_VAR => redis_url = Some(value),
            _ => {}
        }
    }

    Ok(EnvReport {
        file_found: true,
        example_found,
        api_key,
        redis_url,
    })
}

/// Print a human-readable report. Returns whether the environment is ready.
pub fn run(path: &Path) -> Result<bool> {
    println!("Checking {} configuration...\n", path.display());
    let report = inspect(path)?;

    if !report.file_found {
        println!("✗ {} not found!", path.display());
        if report.example_found {
            println!("\nTo fix:");
            println!("1. Copy the example file:");
            println!("   cp .env.example .env");
            println!("2. Edit .env and add your Claude API key");
            println!("3. Get a key from: https://console.anthropic.com/");
        }
        return Ok(false);
    }
    println!("✓ {} exists", path.display());

    match report.api_key {
        KeyState::Set => println!("✓ {API_KEY_VAR} is set"),
        KeyState::Unset => {
            println!("✗ {API_KEY_VAR} not configured");
            println!("\nTo fix:");
            println!("1. Get an API key from: https://console.anthropic.com/");
            println!("2. Edit .env and replace '{API_KEY_PLACEHOLDER}' with your actual key");
        }
        KeyState::Missing => {
            println!("✗ {API_KEY_VAR} not found in {}", path.display());
            println!("\nTo fix:");
            println!("1. Add this line to your .env file:");
            println!("   {API_KEY_VAR}=your_actual_api_key_here");
        }
    }

    match &report.redis_url {
        Some(_) => println!("✓ {REDIS_URL_VAR} configured"),
        None => println!("! {REDIS_URL_VAR} not set (using default: {DEFAULT_REDIS_URL})"),
    }

    println!("\n{}", "=".repeat(50));
    if report.is_ready() {
        println!("Environment is properly configured!");
    } else {
        println!("Environment needs configuration");
    }
    Ok(report.is_ready())
}
