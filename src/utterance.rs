//! Utterance classification and listener hand-off
//!
//! The speech side of a session runs on its own listener thread (capture and
//! transcription are external concerns). It shares nothing with the
//! landmark engines: completed utterances cross over through a
//! one-directional single-consumer channel, and the main loop drains it
//! without blocking between ticks.
//!
//! Classification itself is a small rule set: an utterance is a question
//! when it ends with a question mark, starts with an interrogative keyword,
//! or contains one as a standalone word.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// Default interrogative keyword set
pub const DEFAULT_QUESTION_KEYWORDS: &[&str] = &[
    "what",
    "which",
    "who",
    "how",
    "where",
    "when",
    "why",
    "tell me",
    "explain",
    "can you",
    "could you",
    "do you know",
];

/// Binary utterance kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtteranceKind {
    Question,
    Statement,
}

/// Keyword-rule classifier for transcribed utterances.
///
/// The lexicon is configuration: swap in another language's interrogatives
/// without touching the rules.
#[derive(Debug, Clone)]
pub struct UtteranceClassifier {
    keywords: Vec<String>,
}

impl Default for UtteranceClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_KEYWORDS.iter().map(|s| s.to_string()))
    }
}

impl UtteranceClassifier {
    /// Build a classifier over the given keyword set (matched lowercase)
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Classify one utterance
    pub fn classify(&self, text: &str) -> UtteranceKind {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return UtteranceKind::Statement;
        }
        if text.ends_with('?') {
            return UtteranceKind::Question;
        }
        for keyword in &self.keywords {
            if text == *keyword
                || text.starts_with(&format!("{keyword} "))
                || text.contains(&format!(" {keyword} "))
            {
                return UtteranceKind::Question;
            }
        }
        UtteranceKind::Statement
    }
}

/// One completed utterance handed off from the listener thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    /// When the listener finished transcribing it
    pub heard_at: DateTime<Utc>,
}

impl Utterance {
    /// Stamp an utterance with the current time
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heard_at: Utc::now(),
        }
    }
}

/// Producing half of the hand-off, owned by the listener thread
pub struct UtteranceSender {
    tx: mpsc::Sender<Utterance>,
}

impl UtteranceSender {
    /// Hand one utterance to the main loop. Errors only when the receiver
    /// is gone, which the listener should treat as a shutdown signal.
    pub fn send(&self, utterance: Utterance) -> Result<(), mpsc::SendError<Utterance>> {
        self.tx.send(utterance)
    }
}

/// Consuming half of the hand-off, owned by the main loop
pub struct UtteranceReceiver {
    rx: mpsc::Receiver<Utterance>,
}

impl UtteranceReceiver {
    /// Collect everything queued since the last drain, without blocking
    pub fn try_drain(&self) -> Vec<Utterance> {
        let mut drained = Vec::new();
        while let Ok(utterance) = self.rx.try_recv() {
            drained.push(utterance);
        }
        drained
    }
}

/// Create the one-directional hand-off pair
pub fn utterance_channel() -> (UtteranceSender, UtteranceReceiver) {
    let (tx, rx) = mpsc::channel();
    (UtteranceSender { tx }, UtteranceReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_question_mark_wins() {
        let classifier = UtteranceClassifier::default();
        assert_eq!(
            classifier.classify("the build is green?"),
            UtteranceKind::Question
        );
    }

    #[test]
    fn test_leading_keyword() {
        let classifier = UtteranceClassifier::default();
        assert_eq!(
            classifier.classify("What time does the standup start"),
            UtteranceKind::Question
        );
    }

    #[test]
    fn test_embedded_keyword_needs_word_boundaries() {
        let classifier = UtteranceClassifier::default();
        assert_eq!(
            classifier.classify("I wonder how this works"),
            UtteranceKind::Question
        );
        // "somehow" contains "how" but not as a standalone word
        assert_eq!(
            classifier.classify("it broke somehow again"),
            UtteranceKind::Statement
        );
    }

    #[test]
    fn test_plain_statement() {
        let classifier = UtteranceClassifier::default();
        assert_eq!(
            classifier.classify("the deploy finished at noon"),
            UtteranceKind::Statement
        );
        assert_eq!(classifier.classify(""), UtteranceKind::Statement);
        assert_eq!(classifier.classify("   "), UtteranceKind::Statement);
    }

    #[test]
    fn test_custom_lexicon() {
        let classifier = UtteranceClassifier::new(["qual".to_string(), "quem".to_string()]);
        assert_eq!(
            classifier.classify("Qual é o plano"),
            UtteranceKind::Question
        );
        assert_eq!(
            classifier.classify("what is the plan"),
            UtteranceKind::Statement
        );
    }

    #[test]
    fn test_handoff_crosses_threads() {
        let (tx, rx) = utterance_channel();

        let listener = thread::spawn(move || {
            tx.send(Utterance::now("is anyone there?")).unwrap();
            tx.send(Utterance::now("just checking")).unwrap();
        });
        listener.join().unwrap();

        let drained = rx.try_drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].text, "is anyone there?");
    }

    #[test]
    fn test_drain_is_nonblocking_when_empty() {
        let (_tx, rx) = utterance_channel();
        assert!(rx.try_drain().is_empty());
    }
}
