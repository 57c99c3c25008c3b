//! The intake message that opens every session.

/// The four questions asked before the first turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intake {
    /// Kind of text: novel, essay, screenplay, ...
    pub text_type: String,
    /// Topic or genre.
    pub topic_genre: String,
    /// How much is written so far.
    pub progress: String,
    /// What was written most recently.
    pub last_written: String,
}

impl Intake {
    /// Whether every field has non-blank content.
    pub fn is_complete(&self) -> bool {
        [
            &self.text_type,
            &self.topic_genre,
            &self.progress,
            &self.last_written,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Render the first user message, or `None` while any field is blank.
    pub fn to_message(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(format!(
            "Type: {}\nTopic/Genre: {}\nProgress: {}\nLast Written: {}",
            self.text_type.trim(),
            self.topic_genre.trim(),
            self.progress.trim(),
            self.last_written.trim()
        ))
    }
}
