//! Broken-link report structure and message rendering.

use serde::Serialize;

/// A single broken link: the string as collected and its resolved form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub link: String,
    pub resolved: String,
}

impl BrokenLink {
    pub fn new(link: impl Into<String>, resolved: impl Into<String>) -> Self {
        BrokenLink {
            link: link.into(),
            resolved: resolved.into(),
        }
    }

    fn describe(&self) -> String {
        if self.link == self.resolved {
            self.link.clone()
        } else {
            format!("{} (resolved as: {})", self.link, self.resolved)
        }
    }
}

/// Broken links found on one page, in resolution order.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub page: String,
    pub broken_links: Vec<BrokenLink>,
}

/// All pages with at least one broken link, in processing order.
///
/// A page with no broken links never appears here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrokenLinkReport {
    pub pages: Vec<PageReport>,
}

impl BrokenLinkReport {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of broken links across all pages.
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.broken_links.len()).sum()
    }
}

/// Render the multi-line report text, or `None` when the report is empty.
///
/// The format is stable: a header line, then one block per page listing each
/// broken link, showing the resolved form only when it differs from the
/// collected string.
pub fn render_report(report: &BrokenLinkReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }

    let pages: Vec<String> = report.pages.iter().map(page_message).collect();
    Some(format!("Broken links found!{}\n", pages.join("\n")))
}

fn page_message(page: &PageReport) -> String {
    let links: Vec<String> = page.broken_links.iter().map(BrokenLink::describe).collect();
    format!(
        "\n\n- Page path = {}:\n   -> link to {}",
        page.page,
        links.join("\n   -> link to ")
    )
}
