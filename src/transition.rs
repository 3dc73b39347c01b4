//! Fade-in on load and fade-out before internal navigation.

use crate::dom::{Document, NodeId, SharedDocument};
use std::time::Duration;
use tracing::debug;

const TRANSITION_CLASS: &str = "page-transition";
const LOADED_CLASS: &str = "loaded";

pub const REVEAL_DELAY: Duration = Duration::from_millis(100);
pub const LEAVE_DELAY: Duration = Duration::from_millis(250);

const EXCLUDED_PREFIXES: [&str; 3] = ["tel:", "mailto:", "https://wa.me/"];

/// A navigation the transition has taken over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    /// Time to let the fade-out play before leaving
    pub delay: Duration,
}

/// Whether `href` points into this site.
pub fn is_internal(href: &str, hostname: &str) -> bool {
    href.starts_with("./")
        || href.starts_with('/')
        || (!hostname.is_empty() && href.contains(hostname))
}

fn is_excluded(href: &str, target: Option<&str>) -> bool {
    target == Some("_blank") || EXCLUDED_PREFIXES.iter().any(|p| href.starts_with(p))
}

#[derive(Debug, Default)]
pub struct PageTransition {
    main: Option<NodeId>,
    links: Vec<NodeId>,
}

impl PageTransition {
    /// Mark `main` for the fade-in and collect the links eligible for a
    /// fade-out. Call [`PageTransition::reveal`] to finish the fade-in.
    pub fn attach(doc: &mut Document) -> Self {
        let main = doc.first_by_tag(doc.root(), "main");
        if let Some(main) = main {
            doc.add_class(main, TRANSITION_CLASS);
        }

        let hostname = doc.hostname().to_string();
        let links = doc.query_all(doc.root(), |el| {
            if el.tag() != "a" {
                return false;
            }
            let Some(href) = el.attribute("href") else {
                return false;
            };
            is_internal(href, &hostname) && !is_excluded(href, el.attribute("target"))
        });
        debug!("Page transition tracking {} link(s)", links.len());

        Self { main, links }
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub async fn reveal(&self, doc: &SharedDocument) {
        let Some(main) = self.main else {
            return;
        };
        tokio::time::sleep(REVEAL_DELAY).await;
        doc.borrow_mut().add_class(main, LOADED_CLASS);
    }

    /// Handle a click on `target`. If it is (inside) a tracked link to an
    /// `.html` page, start the fade-out and return the pending navigation.
    pub fn intercept(&self, doc: &mut Document, target: NodeId) -> Option<Navigation> {
        let link = self
            .links
            .iter()
            .copied()
            .find(|&link| doc.contains(link, target))?;
        let href = doc.attribute(link, "href")?.to_string();
        if !href.ends_with(".html") {
            return None;
        }

        let delay = match self.main {
            Some(main) => {
                doc.remove_class(main, LOADED_CLASS);
                LEAVE_DELAY
            }
            None => Duration::ZERO,
        };
        debug!("Leaving for {} in {:?}", href, delay);
        Some(Navigation { href, delay })
    }

    pub async fn navigate(doc: &SharedDocument, navigation: Navigation) {
        if !navigation.delay.is_zero() {
            tokio::time::sleep(navigation.delay).await;
        }
        doc.borrow_mut().navigate(&navigation.href);
    }
}
