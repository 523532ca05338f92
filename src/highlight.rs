//! Sentence highlight toggling.
//!
//! Wrapping moves the minimal sibling range covering a sentence into a new
//! highlight node. When the first or last word sits inside inline elements
//! that also hold words of neighbouring sentences, those elements are split
//! at the word, the same way a DOM range extraction splits partially selected
//! nodes. Every split is recorded on the highlight so that unwrapping can
//! join the halves again and restore the exact previous structure.

use tracing::debug;

use crate::dom::{ArenaDom, NodeData, NodeId, Split, SplitSide, nearest_block};
use crate::sentence::{SentenceSpan, block_sentence, block_words};
use crate::{Config, Error, Result};

/// What a toggle did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// A new highlight now covers `span` of the words of `block`.
    Wrapped {
        wrapper: NodeId,
        block: NodeId,
        span: SentenceSpan,
    },
    /// An existing highlight was removed.
    Unwrapped { wrapper: NodeId },
}

/// Toggle the highlight of the sentence containing `word`.
///
/// On error the tree is unchanged.
pub fn toggle(dom: &mut ArenaDom, word: NodeId, config: &Config) -> Result<Toggle> {
    if !dom.is_word(word) {
        return Err(Error::NoTargetSentence);
    }
    match dom.enclosing_highlight(word) {
        Some(wrapper) => {
            unwrap(dom, wrapper)?;
            Ok(Toggle::Unwrapped { wrapper })
        }
        None => wrap(dom, word, config),
    }
}

/// Highlight the sentence containing `word`.
pub fn wrap(dom: &mut ArenaDom, word: NodeId, config: &Config) -> Result<Toggle> {
    let block = nearest_block(dom, word, config).ok_or(Error::NoTargetSentence)?;
    let words = block_words(dom, block, config);
    let index = words
        .iter()
        .position(|w| w.node == word)
        .ok_or(Error::NoTargetSentence)?;
    let span = block_sentence(dom, &words, index, config)?;
    debug!(
        block = block.0,
        index,
        start = span.start,
        end = span.end,
        "sentence span computed"
    );

    let members = &words[span.start..=span.end];
    if members
        .iter()
        .any(|w| dom.enclosing_highlight(w.node).is_some())
    {
        debug!(block = block.0, "refusing overlapping highlight");
        return Err(Error::AmbiguousOverlap);
    }

    let first = members[0].node;
    let last = members[members.len() - 1].node;
    let wrapper = wrap_range(dom, first, last).ok_or(Error::NoTargetSentence)?;
    debug!(
        wrapper = wrapper.0,
        words = span.word_count(),
        "highlight wrapped"
    );

    Ok(Toggle::Wrapped {
        wrapper,
        block,
        span,
    })
}

/// Remove a highlight, putting its children back where it stood.
pub fn unwrap(dom: &mut ArenaDom, wrapper: NodeId) -> Result<()> {
    let splits = match dom.data(wrapper) {
        Some(NodeData::Highlight { splits }) if dom.parent(wrapper).is_some() => splits.clone(),
        _ => return Err(Error::NoTargetSentence),
    };

    let children: Vec<_> = dom.children(wrapper).collect();
    for child in children {
        dom.detach(child);
        dom.insert_before(wrapper, child);
    }
    dom.detach(wrapper);

    // Shallowest splits were recorded last and must be joined first.
    let mut rejoined = 0;
    for split in splits.iter().rev() {
        if rejoin(dom, *split) {
            rejoined += 1;
        }
    }
    debug!(
        wrapper = wrapper.0,
        splits = splits.len(),
        rejoined,
        "highlight unwrapped"
    );
    Ok(())
}

/// Wrap the siblings from the one holding `first` to the one holding `last`.
fn wrap_range(dom: &mut ArenaDom, first: NodeId, last: NodeId) -> Option<NodeId> {
    let scope = common_ancestor(dom, dom.parent(first)?, dom.parent(last)?)?;

    let mut splits = split_off(dom, first, scope, SplitSide::Before);
    splits.extend(split_off(dom, last, scope, SplitSide::After));

    let start = child_toward(dom, scope, first)?;
    let end = child_toward(dom, scope, last)?;

    let wrapper = dom.create_highlight(splits);
    dom.insert_before(start, wrapper);

    let mut current = Some(start);
    while let Some(id) = current {
        let next = dom.next_sibling(id);
        dom.detach(id);
        dom.append(wrapper, id);
        if id == end {
            break;
        }
        current = next;
    }
    Some(wrapper)
}

/// Lowest node that is `a` or `b` or an ancestor of both.
fn common_ancestor(dom: &ArenaDom, a: NodeId, b: NodeId) -> Option<NodeId> {
    let chain: Vec<_> = dom.ancestors(a).collect();
    dom.ancestors(b).find(|id| chain.contains(id))
}

/// The child of `scope` that contains `node`.
fn child_toward(dom: &ArenaDom, scope: NodeId, node: NodeId) -> Option<NodeId> {
    dom.ancestors(node).find(|&a| dom.parent(a) == Some(scope))
}

/// Split every element between `node` and `scope` so nothing on `side` of
/// `node` shares an element with it. Splits are returned deepest first.
fn split_off(dom: &mut ArenaDom, node: NodeId, scope: NodeId, side: SplitSide) -> Vec<Split> {
    let mut splits = Vec::new();
    let mut current = node;

    while let Some(parent) = dom.parent(current) {
        if parent == scope {
            break;
        }
        let outside = match side {
            SplitSide::Before => dom.prev_sibling(current),
            SplitSide::After => dom.next_sibling(current),
        };
        if outside.is_some() {
            let Some(fragment) = dom.clone_shell(parent) else {
                break;
            };
            match side {
                SplitSide::Before => {
                    dom.insert_before(parent, fragment);
                    while let Some(child) = dom.first_child(parent) {
                        if child == current {
                            break;
                        }
                        dom.detach(child);
                        dom.append(fragment, child);
                    }
                }
                SplitSide::After => {
                    dom.insert_after(parent, fragment);
                    while let Some(child) = dom.next_sibling(current) {
                        dom.detach(child);
                        dom.append(fragment, child);
                    }
                }
            }
            splits.push(Split {
                original: parent,
                fragment,
                side,
            });
        }
        current = parent;
    }
    splits
}

/// Move a fragment's children back into its original, if they are still
/// adjacent. Returns whether the halves were joined.
fn rejoin(dom: &mut ArenaDom, split: Split) -> bool {
    let Split {
        original,
        fragment,
        side,
    } = split;

    let children: Vec<_> = dom.children(fragment).collect();
    match side {
        SplitSide::Before => {
            if dom.next_sibling(fragment) != Some(original) {
                return false;
            }
            for child in children.into_iter().rev() {
                dom.detach(child);
                dom.prepend(original, child);
            }
        }
        SplitSide::After => {
            if dom.prev_sibling(fragment) != Some(original) {
                return false;
            }
            for child in children {
                dom.detach(child);
                dom.append(original, child);
            }
        }
    }
    dom.detach(fragment);
    true
}
