//! Project-wide constants.

use std::time::Duration;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Version reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Anthropic model when none is specified.
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

/// Default Anthropic API root. Overridable for tests and proxies.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Value shipped in `.env.example`. Treated the same as a missing key.
pub const API_KEY_PLACEHOLDER: &str = "your_claude_api_key_here";

pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Longest prompt accepted by `/analyze`, in characters.
pub const MAX_PROMPT_CHARS: usize = 2000;

/// Every cache key starts with this.
pub const CACHE_KEY_PREFIX: &str = "analysis:";

/// How long an analysis stays cached.
pub const CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Return at most `max_chars` characters of `text`, never splitting a
/// multi-byte character. Used to keep log lines short.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!VERSION.is_empty());
        assert!(!DEFAULT_MODEL.is_empty());
    }

    #[test]
    fn consts_from_cargo_toml() {
        assert!(AUTHOR.contains("Assaf Sapir"));
        assert!(HOMEPAGE.contains("sapir.io"));
        assert!(REPO.contains("github.com/assapir/prompt-analyzer"));
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn cache_ttl_is_one_day() {
        assert_eq!(CACHE_TTL.as_secs(), 24 * 60 * 60);
    }

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 50), "hello");
        assert_eq!(preview("", 50), "");
    }

    #[test]
    fn preview_truncates_to_char_count() {
        assert_eq!(preview("abcdefgh", 3), "abc");
    }

    #[test]
    fn preview_respects_multibyte_boundaries() {
        let text = "🚀🚀🚀🚀";
        assert_eq!(preview(text, 2), "🚀🚀");
    }

    #[test]
    fn preview_exact_length() {
        assert_eq!(preview("abc", 3), "abc");
    }
}
