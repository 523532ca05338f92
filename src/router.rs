//! Click routing.
//!
//! Turns a pointer click on a tree node into link navigation, a highlight
//! toggle, or nothing. The router holds no state between clicks.

use tracing::debug;

use crate::dom::{ArenaDom, NodeId, nearest_link, nearest_word};
use crate::highlight::{Toggle, toggle};
use crate::{Config, Error};

/// A pointer click on a node of the content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// The node the pointer landed on.
    pub target: NodeId,
    /// Whether the secondary-activation modifier (Ctrl or Cmd) was held.
    pub modifier: bool,
}

impl Click {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            modifier: false,
        }
    }

    pub fn with_modifier(target: NodeId) -> Self {
        Self {
            target,
            modifier: true,
        }
    }
}

/// What the host should do after a click.
#[derive(Debug)]
pub struct ClickOutcome {
    /// The host must cancel the browser's default action (link navigation).
    pub prevent_default: bool,
    pub action: ClickAction,
}

#[derive(Debug)]
pub enum ClickAction {
    /// Let the link navigate; no highlighting happened.
    FollowLink,
    /// A highlight was added or removed.
    Toggled(Toggle),
    /// The click hit a word but the toggle was refused. The tree is unchanged.
    Refused(Error),
    /// The click hit nothing actionable.
    Ignored,
}

/// Route one click.
pub fn route(dom: &mut ArenaDom, click: Click, config: &Config) -> ClickOutcome {
    let in_link = nearest_link(dom, click.target, config).is_some();
    if in_link && click.modifier {
        debug!(node = click.target.0, "following link");
        return ClickOutcome {
            prevent_default: false,
            action: ClickAction::FollowLink,
        };
    }

    let action = match nearest_word(dom, click.target) {
        Some(word) => match toggle(dom, word, config) {
            Ok(toggled) => ClickAction::Toggled(toggled),
            Err(err) => {
                debug!(word = word.0, %err, "highlight refused");
                ClickAction::Refused(err)
            }
        },
        None => ClickAction::Ignored,
    };

    ClickOutcome {
        prevent_default: in_link,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{highlights, parse_article, words};
    use crate::tokenize::tokenize;

    fn setup(html: &str) -> (ArenaDom, NodeId, Config) {
        let config = Config::default();
        let (mut dom, root) = parse_article(html);
        tokenize(&mut dom, root, &config);
        (dom, root, config)
    }

    #[test]
    fn test_link_click_is_suppressed_and_highlights() {
        let (mut dom, root, config) = setup("<p>Read <a href=\"/more\">the docs</a> today. Bye</p>");
        let docs = words(&dom, root)[2];

        let outcome = route(&mut dom, Click::new(docs), &config);
        assert!(outcome.prevent_default);
        assert!(matches!(outcome.action, ClickAction::Toggled(Toggle::Wrapped { .. })));

        let marks = highlights(&dom, root);
        assert_eq!(dom.collect_text(marks[0]), "Read the docs today.");
    }

    #[test]
    fn test_link_click_with_modifier_navigates() {
        let (mut dom, root, config) = setup("<p>Read <a href=\"/more\">the docs</a>.</p>");
        let docs = words(&dom, root)[2];

        let outcome = route(&mut dom, Click::with_modifier(docs), &config);
        assert!(!outcome.prevent_default);
        assert!(matches!(outcome.action, ClickAction::FollowLink));
        assert!(highlights(&dom, root).is_empty());
    }

    #[test]
    fn test_link_click_off_word_only_suppresses() {
        let (mut dom, root, config) = setup("<p><a href=\"/x\"><img src=\"i.png\"></a> caption</p>");
        let img = dom.find_by_tag("img").unwrap();

        let outcome = route(&mut dom, Click::new(img), &config);
        assert!(outcome.prevent_default);
        assert!(matches!(outcome.action, ClickAction::Ignored));
        assert!(highlights(&dom, root).is_empty());
    }

    #[test]
    fn test_whitespace_and_background_clicks_are_ignored() {
        let (mut dom, _root, config) = setup("<p>one two</p>");
        let p = dom.find_by_tag("p").unwrap();
        let space = dom
            .children(p)
            .find(|&c| dom.is_text(c))
            .expect("inter-word whitespace");

        for target in [space, p] {
            let outcome = route(&mut dom, Click::new(target), &config);
            assert!(!outcome.prevent_default);
            assert!(matches!(outcome.action, ClickAction::Ignored));
        }
    }

    #[test]
    fn test_second_click_unwraps() {
        let (mut dom, root, config) = setup("<p>one two.</p>");
        let one = words(&dom, root)[0];

        route(&mut dom, Click::new(one), &config);
        let outcome = route(&mut dom, Click::new(one), &config);
        assert!(matches!(outcome.action, ClickAction::Toggled(Toggle::Unwrapped { .. })));
        assert!(highlights(&dom, root).is_empty());
    }

    #[test]
    fn test_refusal_is_reported_not_raised() {
        let (mut dom, root, config) = setup("<section>no block here</section>");
        let word = words(&dom, root)[0];

        let outcome = route(&mut dom, Click::new(word), &config);
        assert!(matches!(
            outcome.action,
            ClickAction::Refused(Error::NoTargetSentence)
        ));
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let (mut dom, _root, config) = setup("<p>x</p>");
        let outcome = route(&mut dom, Click::new(NodeId(9_999)), &config);
        assert!(matches!(outcome.action, ClickAction::Ignored));
    }
}
