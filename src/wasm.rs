//! WASM bindings for embedding the highlighter in a browser page.
//!
//! The page renders [`Viewer::html`] into its article container and forwards
//! clicks by reading the `data-nid` attribute of the clicked element. Every
//! element carries one, so clicks on link whitespace or image links route too.

use wasm_bindgen::prelude::*;

use crate::dom::{NodeId, SerializeOptions};
use crate::router::Click;
use crate::{Article, Config};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// A rendered article driven from JavaScript.
#[wasm_bindgen]
pub struct Viewer {
    article: Article,
}

#[wasm_bindgen]
impl Viewer {
    /// Render an article with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(html: &str) -> Viewer {
        Viewer {
            article: Article::render(html),
        }
    }

    /// Replace the article. All highlights are discarded.
    pub fn render(&mut self, html: &str) {
        self.article = Article::render_with(html, Config::clone(self.article.config()));
    }

    /// Route a click on the node with handle `node_id`.
    ///
    /// Returns whether the page must call `preventDefault()` on the event.
    pub fn click(&mut self, node_id: u32, modifier: bool) -> bool {
        let click = Click {
            target: NodeId(node_id),
            modifier,
        };
        self.article.click(click).prevent_default
    }

    /// Markup with node handles, for display.
    pub fn html(&self) -> String {
        self.article.to_html_with(SerializeOptions { node_ids: true })
    }

    /// Markup without node handles, for export.
    pub fn export_html(&self) -> String {
        self.article.to_html()
    }

    /// Number of active highlights.
    pub fn highlight_count(&self) -> usize {
        self.article.highlights().len()
    }
}
