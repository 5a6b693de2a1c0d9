use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Completion, Provider, ProviderError};

/// A scripted provider for tests. Returns pre-defined replies in order and
/// records every user message it receives.
pub struct MockProvider {
    replies: Vec<Result<String, ProviderError>>,
    repeat_last: bool,
    index: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies,
            repeat_last: false,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![Ok(text.into())])
        }
    }

    /// Fail every call with the same error.
    pub fn failing(err: ProviderError) -> Self {
        Self {
            repeat_last: true,
            ..Self::new(vec![Err(err)])
        }
    }

    /// How many times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// User messages received so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, _system: &str, user: &str) -> Result<Completion, ProviderError> {
        self.requests.lock().unwrap().push(user.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let i = if self.repeat_last {
            i.min(self.replies.len().saturating_sub(1))
        } else {
            i
        };
        let reply = self.replies.get(i).ok_or_else(|| {
            ProviderError::Other(format!(
                "MockProvider: no more replies (called {} times)",
                i + 1
            ))
        })?;
        reply.clone().map(|text| Completion { text, usage: None })
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
