//! # notare
//!
//! Click-to-highlight sentences in rendered HTML articles.
//!
//! An article fragment is parsed into an arena tree, every visible run of
//! non-whitespace text becomes a word node, and clicking a word toggles a
//! highlight over the sentence it belongs to. Sentences are found with a
//! local punctuation heuristic and never cross block containers
//! (paragraphs, list items, quotes, headings).
//!
//! ## Quick Start
//!
//! ```
//! use notare::Article;
//!
//! let mut article = Article::render("<p>Hello world. Second sentence here!</p>");
//!
//! // Click "world." to highlight "Hello world."
//! article.click_word(1);
//! assert_eq!(article.highlights()[0].text, "Hello world.");
//!
//! // The annotated markup goes to the export pipeline.
//! let html = article.to_html();
//! assert!(html.contains("<mark class=\"notare-mark\">"));
//!
//! // Clicking any highlighted word removes the highlight again.
//! article.click_word(0);
//! assert!(article.highlights().is_empty());
//! ```

pub mod article;
pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod router;
pub mod sentence;
pub mod tokenize;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use article::{Article, HighlightInfo, WordInfo};
pub use config::Config;
pub use error::{Error, Result};
pub use highlight::Toggle;
pub use router::{Click, ClickAction, ClickOutcome};
pub use sentence::SentenceSpan;
pub use tokenize::TokenizeReport;
pub use util::decode_text;
