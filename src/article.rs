//! A rendered article: one parsed, tokenized input and its highlights.
//!
//! Rendering new input means building a new `Article`; highlights never
//! carry over from one input to the next.

use tracing::debug;

use crate::Config;
use crate::dom::{ArenaDom, NodeId, SerializeOptions, highlights, parse_article, serialize_children, words};
use crate::router::{Click, ClickOutcome, route};
use crate::tokenize::{TokenizeReport, tokenize};

/// One word of the article, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct WordInfo {
    /// Position among all words of the article.
    pub index: usize,
    /// Tree handle, usable as a click target.
    pub node: u32,
    pub text: String,
    /// Position among the words of its block container.
    pub order: usize,
    /// Whether the word belongs to a block container and can be highlighted.
    pub in_block: bool,
    pub highlighted: bool,
}

/// One active highlight, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct HighlightInfo {
    pub node: u32,
    /// The highlighted sentence, including interior whitespace.
    pub text: String,
    pub words: usize,
}

/// A rendered, clickable article.
pub struct Article {
    dom: ArenaDom,
    root: NodeId,
    config: Config,
    report: TokenizeReport,
}

impl Article {
    /// Parse and tokenize `html` with the default configuration.
    pub fn render(html: &str) -> Self {
        Self::render_with(html, Config::default())
    }

    /// Parse and tokenize `html`.
    pub fn render_with(html: &str, config: Config) -> Self {
        let (mut dom, root) = parse_article(html);
        let report = tokenize(&mut dom, root, &config);
        debug!(bytes = html.len(), words = report.created + report.adopted, "article rendered");
        Self {
            dom,
            root,
            config,
            report,
        }
    }

    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// The article container (the parsed `body`).
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn report(&self) -> TokenizeReport {
        self.report
    }

    /// Word nodes in document order.
    pub fn word_nodes(&self) -> Vec<NodeId> {
        words(&self.dom, self.root)
    }

    /// The word node at a document-order index.
    pub fn word_at(&self, index: usize) -> Option<NodeId> {
        self.word_nodes().get(index).copied()
    }

    /// All words with their positions and highlight state.
    pub fn words(&self) -> Vec<WordInfo> {
        self.word_nodes()
            .into_iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let word = self.dom.word(node)?;
                Some(WordInfo {
                    index,
                    node: node.0,
                    text: word.text().to_string(),
                    order: word.order(),
                    in_block: word.block().is_some(),
                    highlighted: self.dom.enclosing_highlight(node).is_some(),
                })
            })
            .collect()
    }

    /// All active highlights.
    pub fn highlights(&self) -> Vec<HighlightInfo> {
        highlights(&self.dom, self.root)
            .into_iter()
            .map(|node| HighlightInfo {
                node: node.0,
                text: self.dom.collect_text(node),
                words: words(&self.dom, node).len(),
            })
            .collect()
    }

    /// Route a click on any tree node.
    pub fn click(&mut self, click: Click) -> ClickOutcome {
        route(&mut self.dom, click, &self.config)
    }

    /// Click the word at a document-order index. Returns `None` when there
    /// is no such word.
    pub fn click_word(&mut self, index: usize) -> Option<ClickOutcome> {
        let node = self.word_at(index)?;
        Some(self.click(Click::new(node)))
    }

    /// Serialize the article body for export.
    pub fn to_html(&self) -> String {
        self.to_html_with(SerializeOptions::default())
    }

    pub fn to_html_with(&self, options: SerializeOptions) -> String {
        serialize_children(&self.dom, self.root, &self.config, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Toggle;
    use crate::router::ClickAction;

    #[test]
    fn test_render_lists_words() {
        let article = Article::render("<h1>Title</h1><p>One two.</p><div>loose</div>");

        let words = article.words();
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["Title", "One", "two.", "loose"]);
        assert_eq!(words[2].order, 1);
        assert!(words[0].in_block);
        assert!(!words[3].in_block);
        assert_eq!(article.report().created, 4);
    }

    #[test]
    fn test_click_word_and_export() {
        let mut article = Article::render("<p>One two. Three</p>");

        let outcome = article.click_word(1).unwrap();
        assert!(matches!(outcome.action, ClickAction::Toggled(Toggle::Wrapped { .. })));
        assert_eq!(
            article.to_html(),
            "<p><mark class=\"notare-mark\"><span class=\"word\">One</span> \
             <span class=\"word\">two.</span></mark> <span class=\"word\">Three</span></p>"
        );
        assert_eq!(
            article.highlights(),
            [HighlightInfo {
                node: article.highlights()[0].node,
                text: "One two.".to_string(),
                words: 2,
            }]
        );
        assert!(article.words()[0].highlighted);
        assert!(!article.words()[2].highlighted);
    }

    #[test]
    fn test_click_word_out_of_range() {
        let mut article = Article::render("<p>only</p>");
        assert!(article.click_word(1).is_none());
    }

    #[test]
    fn test_node_ids_in_markup() {
        let article = Article::render("<p>Hi</p>");
        let node = article.word_at(0).unwrap();
        let html = article.to_html_with(SerializeOptions { node_ids: true });
        assert!(html.contains(&format!("data-nid=\"{}\"", node.0)));
    }

    #[test]
    fn test_rerender_resets_and_restores() {
        let mut article = Article::render("<p>Keep this. And this.</p>");
        article.click_word(0);
        let exported = article.to_html();

        let mut again = Article::render(&exported);
        assert_eq!(again.report().created, 0);
        assert_eq!(again.highlights().len(), 1);
        assert_eq!(again.to_html(), exported);

        // The adopted highlight still toggles off.
        again.click_word(1);
        assert!(again.highlights().is_empty());

        let fresh = Article::render("<p>Keep this. And this.</p>");
        assert!(fresh.highlights().is_empty());
    }
}
