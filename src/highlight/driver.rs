//! Driver
//!
//!     The only part of glint that touches a page. It enumerates highlightable
//!     nodes, reads each node's source text and vocabulary attributes, runs the
//!     scanner, classifier and renderer, and replaces the node's content.
//!
//! Page Capability
//!
//!     Pages are reached through the narrow [Page] trait: list highlightable nodes,
//!     read a node's text and attributes, replace a node's content. The pipeline
//!     itself has no DOM dependency. [HtmlPage] implements the trait over an
//!     html5ever document.
//!
//! Isolation
//!
//!     Nodes are processed in document order, one at a time. A failure reading or
//!     replacing one node is logged and recorded in the [HighlightReport]; that node
//!     keeps its original content and the remaining nodes are still processed.
//!
//! Readiness
//!
//!     [Driver::init] is the explicit initialization entry point. It runs at once
//!     when the caller's readiness signal has already fired, or waits on it exactly
//!     once otherwise. There is no polling and no recurring subscription.

mod html_page;

pub use html_page::HtmlPage;

use super::classifying::{split_list, Vocabulary};
use crate::config::{HighlightConfig, MarkerConfig};
use crate::error::{GlintError, Result};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Capabilities the driver needs from a hosting page.
pub trait Page {
    type Node;

    /// Highlightable nodes, in document order.
    fn highlightable_nodes(&self, marker: &MarkerConfig) -> Vec<Self::Node>;

    /// Current text content of a node.
    fn read_text(&self, node: &Self::Node) -> Result<String>;

    /// Value of an attribute, `None` when the node does not carry it.
    fn read_attribute(&self, node: &Self::Node, name: &str) -> Result<Option<String>>;

    /// Replace the node's content with rendered HTML.
    ///
    /// Implementations must leave the node untouched when they return an error.
    fn replace_content(&mut self, node: &Self::Node, html: &str) -> Result<()>;
}

/// Signal telling the driver that the page is ready to be highlighted.
#[derive(Debug)]
pub enum Readiness {
    /// The page is already ready.
    Fired,
    /// The page becomes ready when the sender half fires.
    Pending(oneshot::Receiver<()>),
}

impl Readiness {
    /// Create a pending signal together with the handle that fires it.
    pub fn pending() -> (oneshot::Sender<()>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Readiness::Pending(receiver))
    }
}

/// A node the driver left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    /// Position of the node in document order.
    pub index: usize,
    pub reason: String,
}

/// Outcome of one highlighting pass over a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightReport {
    pub highlighted: usize,
    pub skipped: Vec<SkippedNode>,
}

impl HighlightReport {
    pub fn total(&self) -> usize {
        self.highlighted + self.skipped.len()
    }
}

/// Runs the highlighting pipeline over the marked nodes of a page.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: HighlightConfig,
}

impl Driver {
    pub fn new(config: HighlightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Highlight the page once it is ready.
    ///
    /// Fails with [GlintError::ReadinessDropped] when a pending signal is dropped
    /// without firing; the page is not touched in that case.
    pub async fn init<P: Page>(&self, page: &mut P, readiness: Readiness) -> Result<HighlightReport> {
        if let Readiness::Pending(signal) = readiness {
            debug!("waiting for page readiness");
            signal.await.map_err(|_| GlintError::ReadinessDropped)?;
        }
        Ok(self.highlight_page(page))
    }

    /// Highlight every marked node of the page, in document order.
    pub fn highlight_page<P: Page>(&self, page: &mut P) -> HighlightReport {
        let nodes = page.highlightable_nodes(&self.config.marker);
        debug!(count = nodes.len(), "found highlightable nodes");

        let mut report = HighlightReport::default();
        for (index, node) in nodes.iter().enumerate() {
            match self.highlight_node(page, node) {
                Ok(()) => report.highlighted += 1,
                Err(err) => {
                    warn!(index, error = %err, "leaving node untouched");
                    report.skipped.push(SkippedNode {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            highlighted = report.highlighted,
            skipped = report.skipped.len(),
            "highlighting pass finished"
        );
        report
    }

    /// Run the pipeline for one snippet, falling back to the configured
    /// vocabularies for absent attributes.
    pub fn highlight_source(
        &self,
        source: &str,
        keywords: Option<&str>,
        types: Option<&str>,
    ) -> String {
        let vocabulary = self.vocabulary_for(keywords, types);
        super::highlight(source, &vocabulary)
    }

    /// Vocabulary for a node carrying the given attribute values.
    pub fn vocabulary_for(&self, keywords: Option<&str>, types: Option<&str>) -> Vocabulary {
        let defaults = &self.config.vocabulary;
        Vocabulary::new(
            list_or_default(keywords, &defaults.keywords),
            list_or_default(types, &defaults.types),
        )
    }

    fn highlight_node<P: Page>(&self, page: &mut P, node: &P::Node) -> Result<()> {
        let marker = &self.config.marker;
        let source = page.read_text(node)?;
        let keywords = page.read_attribute(node, &marker.keywords_attribute)?;
        let types = page.read_attribute(node, &marker.types_attribute)?;

        let html = self.highlight_source(&source, keywords.as_deref(), types.as_deref());
        page.replace_content(node, &html)
    }
}

fn list_or_default(attribute: Option<&str>, default: &[String]) -> Vec<String> {
    match attribute {
        Some(list) => split_list(list).map(str::to_string).collect(),
        None => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory page used to exercise the driver without a DOM.
    #[derive(Default)]
    struct MemoryPage {
        nodes: Vec<MemoryNode>,
    }

    #[derive(Default)]
    struct MemoryNode {
        text: String,
        attributes: HashMap<String, String>,
        content: Option<String>,
        unreadable: bool,
    }

    impl MemoryPage {
        fn with_nodes(texts: &[&str]) -> Self {
            let nodes = texts
                .iter()
                .map(|text| MemoryNode {
                    text: text.to_string(),
                    ..Default::default()
                })
                .collect();
            Self { nodes }
        }
    }

    impl Page for MemoryPage {
        type Node = usize;

        fn highlightable_nodes(&self, _marker: &MarkerConfig) -> Vec<usize> {
            (0..self.nodes.len()).collect()
        }

        fn read_text(&self, node: &usize) -> Result<String> {
            let node = &self.nodes[*node];
            if node.unreadable {
                return Err(GlintError::Node("text unavailable".to_string()));
            }
            Ok(node.text.clone())
        }

        fn read_attribute(&self, node: &usize, name: &str) -> Result<Option<String>> {
            Ok(self.nodes[*node].attributes.get(name).cloned())
        }

        fn replace_content(&mut self, node: &usize, html: &str) -> Result<()> {
            self.nodes[*node].content = Some(html.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_uses_default_vocabulary_without_attributes() {
        let mut page = MemoryPage::with_nodes(&["let n: Int"]);
        let report = Driver::default().highlight_page(&mut page);

        assert_eq!(report.highlighted, 1);
        assert_eq!(
            page.nodes[0].content.as_deref(),
            Some(r#"<span class="k">let</span> n<span class="p">:</span> <span class="kt">Int</span>"#)
        );
    }

    #[test]
    fn test_attributes_replace_defaults() {
        let mut page = MemoryPage::with_nodes(&["let fn"]);
        page.nodes[0]
            .attributes
            .insert("data-keywords".to_string(), "fn".to_string());

        Driver::default().highlight_page(&mut page);

        assert_eq!(
            page.nodes[0].content.as_deref(),
            Some(r#"let <span class="k">fn</span>"#)
        );
    }

    #[test]
    fn test_empty_attribute_means_empty_vocabulary() {
        let driver = Driver::default();
        let vocabulary = driver.vocabulary_for(Some(""), None);
        assert!(!vocabulary.is_keyword("let"));
        assert!(vocabulary.is_type("Int"));
    }

    #[test]
    fn test_failing_node_does_not_stop_the_pass() {
        let mut page = MemoryPage::with_nodes(&["a", "b", "c"]);
        page.nodes[1].unreadable = true;

        let report = Driver::default().highlight_page(&mut page);

        assert_eq!(report.highlighted, 2);
        assert_eq!(
            report.skipped,
            vec![SkippedNode {
                index: 1,
                reason: "Node error: text unavailable".to_string(),
            }]
        );
        assert_eq!(report.total(), 3);
        assert_eq!(page.nodes[0].content.as_deref(), Some("a"));
        assert_eq!(page.nodes[1].content, None);
        assert_eq!(page.nodes[2].content.as_deref(), Some("c"));
    }

    #[test]
    fn test_highlighting_is_idempotent_on_same_source() {
        let driver = Driver::default();
        let first = driver.highlight_source("let x = f(1)", None, None);
        let second = driver.highlight_source("let x = f(1)", None, None);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_init_runs_immediately_when_fired() {
        let mut page = MemoryPage::with_nodes(&["x"]);
        let report = Driver::default()
            .init(&mut page, Readiness::Fired)
            .await
            .unwrap();
        assert_eq!(report.highlighted, 1);
    }

    #[tokio::test]
    async fn test_init_waits_for_pending_signal() {
        let mut page = MemoryPage::with_nodes(&["x"]);
        let (ready, readiness) = Readiness::pending();

        let fire = tokio::spawn(async move {
            tokio::task::yield_now().await;
            ready.send(()).unwrap();
        });

        let report = Driver::default().init(&mut page, readiness).await.unwrap();
        fire.await.unwrap();
        assert_eq!(report.highlighted, 1);
    }

    #[tokio::test]
    async fn test_init_without_signal_leaves_page_untouched() {
        let mut page = MemoryPage::with_nodes(&["x"]);
        let (ready, readiness) = Readiness::pending();
        drop(ready);

        let result = Driver::default().init(&mut page, readiness).await;
        assert!(matches!(result, Err(GlintError::ReadinessDropped)));
        assert_eq!(page.nodes[0].content, None);
    }
}
