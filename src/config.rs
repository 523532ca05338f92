//! Engine configuration.
//!
//! Decides which elements count as block containers, which are skipped by
//! tokenization, what punctuation ends a sentence, and how words and
//! highlights are written back to markup.

#[cfg(feature = "cli")]
use std::path::Path;

/// Tag classification and markup naming used by every stage of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct Config {
    /// Elements that own the words inside them for sentence purposes.
    pub block_tags: Vec<String>,
    /// Elements whose text is never tokenized.
    pub skip_tags: Vec<String>,
    /// Hyperlink elements whose default navigation the router suppresses.
    pub link_tags: Vec<String>,
    /// A word whose last character is one of these ends a sentence.
    pub terminal_marks: Vec<char>,
    /// Class of the `span` a word serializes to.
    pub word_class: String,
    /// Element a highlight serializes to.
    pub highlight_tag: String,
    /// Class of the highlight element.
    pub highlight_class: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_tags: ["p", "li", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6"]
                .map(String::from)
                .to_vec(),
            skip_tags: ["script", "style"].map(String::from).to_vec(),
            link_tags: vec!["a".to_string()],
            terminal_marks: vec!['.', '!', '?'],
            word_class: "word".to_string(),
            highlight_tag: "mark".to_string(),
            highlight_class: "notare-mark".to_string(),
        }
    }
}

impl Config {
    pub fn is_block_tag(&self, tag: &str) -> bool {
        self.block_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_skip_tag(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn is_link_tag(&self, tag: &str) -> bool {
        self.link_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Whether a word's text ends a sentence.
    pub fn ends_sentence(&self, word: &str) -> bool {
        word.chars()
            .next_back()
            .is_some_and(|c| self.terminal_marks.contains(&c))
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "cli")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    #[cfg(feature = "cli")]
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
