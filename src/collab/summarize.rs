use crate::session::{ErrorCode, ServerEvent};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Summarization collaborator boundary.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String>;

    /// Collaborator name for logging.
    fn name(&self) -> &str;
}

/// Invokes the summarization collaborator once per session, after the final
/// transcript was emitted. Best-effort: failure is reported, never fatal.
pub struct SummarizationTrigger {
    summarizer: Arc<dyn Summarizer>,
    invoked: bool,
}

impl SummarizationTrigger {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            invoked: false,
        }
    }

    /// Run the summarizer. Returns `None` if it was already invoked for this
    /// session.
    pub async fn run(&mut self, full_transcript: &str) -> Option<ServerEvent> {
        if self.invoked {
            warn!("summarization trigger invoked twice; ignoring");
            return None;
        }
        self.invoked = true;

        match self.summarizer.summarize(full_transcript).await {
            Ok(summary_text) => {
                info!(
                    summarizer = self.summarizer.name(),
                    chars = summary_text.len(),
                    "summary produced"
                );
                Some(ServerEvent::Summary { summary_text })
            }
            Err(e) => {
                warn!(
                    summarizer = self.summarizer.name(),
                    error = %e,
                    "summarization failed"
                );
                Some(ServerEvent::Error {
                    code: ErrorCode::SummarizationFailure,
                    message: format!("summarization failed: {e:#}"),
                })
            }
        }
    }
}

/// Wiring-stub summarizer: keeps the leading words of the transcript.
#[derive(Debug)]
pub struct LeadSummarizer {
    pub max_words: usize,
}

impl Default for LeadSummarizer {
    fn default() -> Self {
        Self { max_words: 16 }
    }
}

#[async_trait::async_trait]
impl Summarizer for LeadSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        let words: Vec<&str> = transcript.split_whitespace().collect();
        let mut summary = words
            .iter()
            .take(self.max_words)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if words.len() > self.max_words {
            summary.push_str(" ...");
        }
        Ok(summary)
    }

    fn name(&self) -> &str {
        "lead"
    }
}
