//! Keyword-scored FAQ matching.
//!
//! Each entry carries a list of keywords. A question is lowercased, stripped
//! of ASCII punctuation and split into words; the entry whose keywords hit
//! the most words wins. Greetings short-circuit to a fixed hello.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const GREETING_ANSWER: &str =
    "Hello! I’m the Internship Assistant FAQ Bot. How can I help you?";

pub const OUT_OF_SCOPE_ANSWER: &str = "I’m designed to answer internship-related questions. \
     Please ask about tasks, submission, certificates, or duration.";

const GREETINGS: &[&str] = &["hi", "hello", "hey", "morning", "evening"];

const BUNDLED_FAQS: &str = include_str!("../../assets/faqs.json");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub keywords: Vec<String>,
    pub answer: String,
}

#[derive(Debug)]
pub enum FaqError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for FaqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaqError::Io(e) => write!(f, "FAQ file I/O error: {e}"),
            FaqError::Parse(e) => write!(f, "FAQ file parse error: {e}"),
        }
    }
}

impl std::error::Error for FaqError {}

#[derive(Debug, Clone, Default)]
pub struct FaqBook {
    entries: Vec<FaqEntry>,
}

impl FaqBook {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Parses a JSON array of `{keywords, answer}` objects.
    pub fn from_json(json: &str) -> Result<Self, FaqError> {
        let entries: Vec<FaqEntry> = serde_json::from_str(json).map_err(FaqError::Parse)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, FaqError> {
        let contents = fs::read_to_string(path).map_err(FaqError::Io)?;
        let book = Self::from_json(&contents)?;
        info!("Loaded {} FAQ entries from {}", book.len(), path.display());
        Ok(book)
    }

    /// The FAQ set compiled into the binary.
    pub fn bundled() -> Result<Self, FaqError> {
        Self::from_json(BUNDLED_FAQS)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_best_answer(&self, message: &str) -> String {
        let words = tokenize(message);

        if words.iter().any(|w| GREETINGS.contains(&w.as_str())) {
            return GREETING_ANSWER.to_string();
        }

        let mut best_score = 0;
        let mut best_answer = None;
        for entry in &self.entries {
            let score = entry
                .keywords
                .iter()
                .filter(|k| words.iter().any(|w| w.eq_ignore_ascii_case(k)))
                .count();
            // Strictly greater: ties keep the earlier entry
            if score > best_score {
                best_score = score;
                best_answer = Some(&entry.answer);
            }
        }

        debug!("FAQ match score {} for {} words", best_score, words.len());

        match best_answer {
            Some(answer) => answer.clone(),
            None => OUT_OF_SCOPE_ANSWER.to_string(),
        }
    }
}

/// Lowercase, drop ASCII punctuation, split on whitespace.
fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
