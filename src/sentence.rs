//! Sentence boundary classification.
//!
//! A word ends a sentence when its last character is a terminal mark. The
//! sentence around a target word extends backward until the previous word is
//! a boundary and forward until (and including) the first boundary. This is
//! purely local: abbreviations such as "Dr." and decimals such as "3.5" at
//! the end of a word are treated as sentence ends.

use crate::dom::{ArenaDom, NodeId, Visitor, Walk, WordUnit, walk};
use crate::{Config, Error, Result};

/// Inclusive range of word indices within one block container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
}

impl SentenceSpan {
    /// Number of words in the span. Never zero.
    pub fn word_count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Compute the sentence containing `index` among `len` units.
///
/// `is_boundary(i)` reports whether unit `i` ends a sentence.
pub fn sentence_span_by<F>(len: usize, index: usize, is_boundary: F) -> Result<SentenceSpan>
where
    F: Fn(usize) -> bool,
{
    if len == 0 {
        return Err(Error::NoTargetSentence);
    }
    if index >= len {
        return Err(Error::InvalidIndex { index, len });
    }

    let mut start = index;
    while start > 0 && !is_boundary(start - 1) {
        start -= 1;
    }

    let mut end = index;
    while end < len - 1 && !is_boundary(end) {
        end += 1;
    }

    Ok(SentenceSpan { start, end })
}

/// Compute the sentence containing `index` among word texts.
pub fn sentence_span<S: AsRef<str>>(
    words: &[S],
    index: usize,
    config: &Config,
) -> Result<SentenceSpan> {
    sentence_span_by(words.len(), index, |i| config.ends_sentence(words[i].as_ref()))
}

/// A word as seen from its block container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWord {
    pub node: NodeId,
    /// A nested block container follows this word before the block's next
    /// word, so a sentence cannot continue past it.
    pub interrupted: bool,
}

/// The words owned by `block` in document order.
///
/// Words inside nested block containers belong to those containers and are
/// not included; the word preceding a nested container is marked as
/// interrupted.
pub fn block_words(dom: &ArenaDom, block: NodeId, config: &Config) -> Vec<BlockWord> {
    struct Collect<'a> {
        config: &'a Config,
        words: Vec<BlockWord>,
    }

    impl Visitor for Collect<'_> {
        fn element(&mut self, dom: &ArenaDom, id: NodeId) -> Walk {
            let nested = dom
                .element_name(id)
                .is_some_and(|name| self.config.is_block_tag(name.as_ref()));
            if !nested {
                return Walk::Continue;
            }
            if let Some(last) = self.words.last_mut() {
                last.interrupted = true;
            }
            Walk::Skip
        }

        fn word(&mut self, _dom: &ArenaDom, id: NodeId, _word: &WordUnit) {
            self.words.push(BlockWord {
                node: id,
                interrupted: false,
            });
        }
    }

    let mut collect = Collect {
        config,
        words: Vec::new(),
    };
    walk(dom, block, &mut collect);
    collect.words
}

/// Compute the sentence containing `index` among the block's words.
pub fn block_sentence(
    dom: &ArenaDom,
    words: &[BlockWord],
    index: usize,
    config: &Config,
) -> Result<SentenceSpan> {
    sentence_span_by(words.len(), index, |i| {
        words[i].interrupted
            || dom
                .word(words[i].node)
                .is_some_and(|w| config.ends_sentence(w.text()))
    })
}
