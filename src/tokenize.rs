//! Word segmentation.
//!
//! Replaces every eligible text node under the article root with an
//! alternating sequence of whitespace text nodes and word nodes. Structure,
//! attributes and whitespace are otherwise left exactly as parsed.
//!
//! Re-running over already tokenized content creates no new words: words are
//! their own node kind and never revisited as text, and text whose nearest
//! element is a skipped container or a highlight is left alone. Markup that
//! was produced by the serializer is recognised on the way in, so existing
//! word spans and highlight marks are adopted instead of re-tokenized.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::Config;
use crate::dom::{
    ArenaDom, NodeData, NodeId, Visitor, Walk, WordUnit, holds_raw_text, nearest_block, walk,
};

/// Counts from one tokenization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizeReport {
    /// Words created from text nodes.
    pub created: usize,
    /// Words adopted from serialized word spans.
    pub adopted: usize,
    /// Highlight marks adopted from serialized markup.
    pub highlights_adopted: usize,
    /// Text nodes replaced by words and whitespace.
    pub split_nodes: usize,
    /// Non-blank text nodes left alone by the exclusion policy.
    pub skipped_nodes: usize,
}

/// Tokenize every eligible text node under `root`.
pub fn tokenize(dom: &mut ArenaDom, root: NodeId, config: &Config) -> TokenizeReport {
    let mut report = TokenizeReport::default();
    adopt_markup(dom, root, config, &mut report);

    let mut scan = Scan {
        config,
        items: Vec::new(),
        skipped: 0,
    };
    walk(dom, root, &mut scan);
    report.skipped_nodes = scan.skipped;

    let mut counters: HashMap<Option<NodeId>, usize> = HashMap::new();
    for item in scan.items {
        match item {
            Item::Word(id) => {
                let block = nearest_block(dom, id, config);
                let order = next_order(&mut counters, block);
                renumber(dom, id, order, block);
            }
            Item::Text(id) => {
                let block = nearest_block(dom, id, config);
                report.created += split_text_node(dom, id, block, &mut counters);
                report.split_nodes += 1;
            }
        }
    }

    debug!(
        created = report.created,
        adopted = report.adopted,
        split_nodes = report.split_nodes,
        skipped_nodes = report.skipped_nodes,
        "tokenize complete"
    );
    report
}

/// Split text into alternating whitespace and non-whitespace runs.
pub fn split_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            runs.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}

enum Item {
    Word(NodeId),
    Text(NodeId),
}

struct Scan<'a> {
    config: &'a Config,
    items: Vec<Item>,
    skipped: usize,
}

impl Visitor for Scan<'_> {
    fn text(&mut self, dom: &ArenaDom, id: NodeId, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let excluded = dom.parent(id).is_some_and(|parent| {
            dom.is_highlight(parent)
                || dom.element_name(parent).is_some_and(|name| {
                    self.config.is_skip_tag(name.as_ref()) || holds_raw_text(name.as_ref())
                })
        });
        if excluded {
            trace!(node = id.0, "skipping excluded text");
            self.skipped += 1;
        } else {
            self.items.push(Item::Text(id));
        }
    }

    fn word(&mut self, _dom: &ArenaDom, id: NodeId, _word: &WordUnit) {
        self.items.push(Item::Word(id));
    }
}

fn next_order(counters: &mut HashMap<Option<NodeId>, usize>, block: Option<NodeId>) -> usize {
    let counter = counters.entry(block).or_default();
    let order = *counter;
    *counter += 1;
    order
}

fn renumber(dom: &mut ArenaDom, id: NodeId, order: usize, block: Option<NodeId>) {
    let Some(word) = dom.word(id) else {
        return;
    };
    if word.order() != order || word.block() != block {
        let word = WordUnit::new(word.text(), order, block);
        dom.set_data(id, NodeData::Word(word));
    }
}

/// Replace one text node with its runs. Returns the number of words created.
fn split_text_node(
    dom: &mut ArenaDom,
    id: NodeId,
    block: Option<NodeId>,
    counters: &mut HashMap<Option<NodeId>, usize>,
) -> usize {
    let Some(text) = dom.text_content(id).map(str::to_string) else {
        return 0;
    };

    let mut created = 0;
    for run in split_runs(&text) {
        let node = if run.starts_with(char::is_whitespace) {
            dom.create_text(run.to_string())
        } else {
            created += 1;
            let order = next_order(counters, block);
            dom.create_word(WordUnit::new(run, order, block))
        };
        dom.insert_before(id, node);
    }
    dom.detach(id);
    created
}

/// Turn serialized word spans and highlight marks back into engine nodes.
fn adopt_markup(dom: &mut ArenaDom, root: NodeId, config: &Config, report: &mut TokenizeReport) {
    struct Adopt<'a> {
        config: &'a Config,
        words: Vec<(NodeId, NodeId, String)>,
        marks: Vec<NodeId>,
    }

    impl Visitor for Adopt<'_> {
        fn element(&mut self, dom: &ArenaDom, id: NodeId) -> Walk {
            let classes = dom.element_classes(id);
            if dom.is_element_named(id, "span") && classes.contains(&self.config.word_class) {
                let mut children = dom.children(id);
                if let (Some(child), None) = (children.next(), children.next())
                    && let Some(text) = dom.text_content(child)
                    && !text.is_empty()
                    && !text.contains(char::is_whitespace)
                {
                    self.words.push((id, child, text.to_string()));
                    return Walk::Skip;
                }
            }
            if dom.is_element_named(id, &self.config.highlight_tag)
                && classes.contains(&self.config.highlight_class)
            {
                self.marks.push(id);
            }
            Walk::Continue
        }
    }

    let mut adopt = Adopt {
        config,
        words: Vec::new(),
        marks: Vec::new(),
    };
    walk(dom, root, &mut adopt);

    for (span, child, text) in adopt.words {
        dom.detach(child);
        dom.set_data(span, NodeData::Word(WordUnit::new(text, 0, None)));
        report.adopted += 1;
    }
    for mark in adopt.marks {
        dom.set_data(mark, NodeData::Highlight { splits: Vec::new() });
        report.highlights_adopted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{SerializeOptions, parse_article, serialize_children, words};

    fn tokenized(html: &str) -> (ArenaDom, NodeId, TokenizeReport) {
        let (mut dom, root) = parse_article(html);
        let report = tokenize(&mut dom, root, &Config::default());
        (dom, root, report)
    }

    fn word_texts(dom: &ArenaDom, root: NodeId) -> Vec<String> {
        words(dom, root)
            .into_iter()
            .map(|w| dom.word(w).unwrap().text().to_string())
            .collect()
    }

    #[test]
    fn test_split_runs_alternates() {
        assert_eq!(split_runs("Hello  world."), ["Hello", "  ", "world."]);
        assert_eq!(split_runs(" lead\ttrail\n"), [" ", "lead", "\t", "trail", "\n"]);
        assert_eq!(split_runs("one"), ["one"]);
        assert!(split_runs("").is_empty());
    }

    #[test]
    fn test_sentence_words() {
        let (dom, root, report) = tokenized("<p>Hello world. Second sentence here! Third?</p>");

        assert_eq!(report.created, 6);
        assert_eq!(report.split_nodes, 1);
        assert_eq!(
            word_texts(&dom, root),
            ["Hello", "world.", "Second", "sentence", "here!", "Third?"]
        );
    }

    #[test]
    fn test_text_is_preserved() {
        let html = "<h2>Title  here</h2>\n<p>One <em>two</em>\tthree.</p>";
        let (dom, root, _) = tokenized(html);
        let (original, original_root) = parse_article(html);

        assert_eq!(dom.collect_text(root), original.collect_text(original_root));
        assert_eq!(word_texts(&dom, root), ["Title", "here", "One", "two", "three."]);
    }

    #[test]
    fn test_order_is_per_block() {
        let (dom, root, _) = tokenized("<p>a b</p><ul><li>c</li><li>d e</li></ul>");

        let orders: Vec<_> = words(&dom, root)
            .into_iter()
            .map(|w| dom.word(w).unwrap().order())
            .collect();
        assert_eq!(orders, [0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_nested_block_owns_its_words() {
        let (dom, root, _) = tokenized("<blockquote>lead <p>inner words</p> tail</blockquote>");

        let quote = dom.find_by_tag("blockquote").unwrap();
        let p = dom.find_by_tag("p").unwrap();
        let owners: Vec<_> = words(&dom, root)
            .into_iter()
            .map(|w| {
                let word = dom.word(w).unwrap();
                (word.block(), word.order())
            })
            .collect();
        assert_eq!(
            owners,
            [(Some(quote), 0), (Some(p), 0), (Some(p), 1), (Some(quote), 1)]
        );
    }

    #[test]
    fn test_words_outside_blocks_have_no_owner() {
        let (dom, root, report) = tokenized("<div>loose text</div>");

        assert_eq!(report.created, 2);
        for w in words(&dom, root) {
            assert_eq!(dom.word(w).unwrap().block(), None);
        }
    }

    #[test]
    fn test_script_and_style_are_skipped() {
        let (dom, root, report) =
            tokenized("<p>shown</p><script>var hidden = 1;</script><style>p { x: y }</style>");

        assert_eq!(word_texts(&dom, root), ["shown"]);
        assert_eq!(report.skipped_nodes, 2);
    }

    #[test]
    fn test_raw_text_elements_are_skipped() {
        let (dom, root, report) = tokenized(
            "<p>Hi there.</p><noscript><img src=\"a.png\"></noscript>\
             <xmp>a &amp; b</xmp><textarea>typed text</textarea><iframe>frame body</iframe>",
        );

        assert_eq!(word_texts(&dom, root), ["Hi", "there."]);
        assert_eq!(report.skipped_nodes, 4);
        let noscript = dom.find_by_tag("noscript").unwrap();
        let inner = dom.first_child(noscript).unwrap();
        assert_eq!(dom.text_content(inner), Some("<img src=\"a.png\">"));
    }

    #[test]
    fn test_whitespace_only_nodes_untouched() {
        let (dom, root, report) = tokenized("<ul>\n  <li>x</li>\n</ul>");

        assert_eq!(report.split_nodes, 1);
        let ul = dom.find_by_tag("ul").unwrap();
        let first = dom.first_child(ul).unwrap();
        assert_eq!(dom.text_content(first), Some("\n  "));
        assert_eq!(word_texts(&dom, root), ["x"]);
    }

    #[test]
    fn test_second_pass_creates_nothing() {
        let (mut dom, root, first) = tokenized("<p>One two. <b>Three</b> four!</p>");
        let before = serialize_children(&dom, root, &Config::default(), SerializeOptions::default());

        let second = tokenize(&mut dom, root, &Config::default());
        let after = serialize_children(&dom, root, &Config::default(), SerializeOptions::default());

        assert_eq!(first.created, 4);
        assert_eq!(second.created, 0);
        assert_eq!(second.split_nodes, 0);
        assert_eq!(before, after);
    }

    #[test]
    fn test_serialized_output_is_adopted() {
        let config = Config::default();
        let (dom, root, _) = tokenized("<p>One two. Three</p>");
        let markup = serialize_children(&dom, root, &config, SerializeOptions::default());
        assert_eq!(
            markup,
            "<p><span class=\"word\">One</span> <span class=\"word\">two.</span> \
             <span class=\"word\">Three</span></p>"
        );

        let (mut again, again_root) = parse_article(&markup);
        let report = tokenize(&mut again, again_root, &config);
        assert_eq!(report.created, 0);
        assert_eq!(report.adopted, 3);
        assert_eq!(
            serialize_children(&again, again_root, &config, SerializeOptions::default()),
            markup
        );
        let p = again.find_by_tag("p").unwrap();
        let last = words(&again, again_root)[2];
        assert_eq!(again.word(last).unwrap().order(), 2);
        assert_eq!(again.word(last).unwrap().block(), Some(p));
    }

    #[test]
    fn test_serialized_highlight_is_adopted() {
        let markup = "<p><mark class=\"notare-mark\"><span class=\"word\">Hi.</span></mark> \
                      <span class=\"word\">Bye</span></p>";
        let (dom, root, report) = tokenized(markup);

        assert_eq!(report.highlights_adopted, 1);
        assert_eq!(report.created, 0);
        let first = words(&dom, root)[0];
        assert!(dom.enclosing_highlight(first).is_some());
    }

    #[test]
    fn test_plain_span_with_word_class_and_spaces_is_tokenized() {
        let (dom, root, report) = tokenized("<p><span class=\"word\">two words</span></p>");

        assert_eq!(report.adopted, 0);
        assert_eq!(report.created, 2);
        assert_eq!(word_texts(&dom, root), ["two", "words"]);
    }
}
