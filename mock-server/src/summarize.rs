use crate::error::AppError;

/// Produces a short summary of a note's content.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, content: &str) -> Result<String, AppError>;
}

/// Keeps the first `max_words` words, marking truncation with `…`.
#[derive(Debug, Clone)]
pub struct LeadingWordsSummarizer {
    max_words: usize,
}

impl LeadingWordsSummarizer {
    pub fn new(max_words: usize) -> Self {
        Self {
            max_words: max_words.max(1),
        }
    }
}

impl Summarizer for LeadingWordsSummarizer {
    fn summarize(&self, content: &str) -> Result<String, AppError> {
        let words: Vec<&str> = content.split_whitespace().collect();
        if words.is_empty() {
            return Err(AppError::Validation("note has no content to summarize".to_string()));
        }
        let mut summary = words[..words.len().min(self.max_words)].join(" ");
        if words.len() > self.max_words {
            summary.push('…');
        }
        Ok(summary)
    }
}
