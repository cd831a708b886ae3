//! Broken-link detection pass and failure-policy dispatch.
//!
//! The pass runs once over fully-collected build data: links matching an
//! ignore pattern are dropped, links to existing output files are filtered
//! out, the rest are resolved against their page and matched against the
//! flattened route table. Pages left with unmatched links form the report,
//! which the configured policy turns into a log line, an error-level
//! diagnostic, or a fatal failure.

use crate::config::{normalize_base_url, Config, OnBrokenLinks};
use crate::files::filter_existing_files;
use crate::manifest::PageLinks;
use crate::matcher::matches_any;
use crate::report::{render_report, BrokenLink, BrokenLinkReport, PageReport};
use crate::resolve::{path_component, resolve_pathname};
use crate::routes::{leaf_routes, Route};
use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal outcome of the `throw` policy, carrying the rendered report.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct BrokenLinksError(pub String);

/// One detection pass over a site's routes and collected links.
pub struct LinkChecker {
    base_url: String,
    out_dir: PathBuf,
    policy: OnBrokenLinks,
    ignore: Vec<Regex>,
}

impl LinkChecker {
    /// Checker with no ignore patterns. The base URL is normalized to the
    /// leading-and-trailing-slash form expected by the existing-file filter.
    pub fn new(base_url: &str, out_dir: impl Into<PathBuf>, policy: OnBrokenLinks) -> Self {
        LinkChecker {
            base_url: normalize_base_url(base_url),
            out_dir: out_dir.into(),
            policy,
            ignore: Vec::new(),
        }
    }

    /// Checker configured from a loaded site configuration.
    pub fn from_config(config: &Config) -> Self {
        LinkChecker::new(&config.base_url, config.output_dir(), config.on_broken_links)
            .with_ignore_patterns(&config.ignore_patterns)
    }

    /// Replace the configured failure policy.
    pub fn with_policy(mut self, policy: OnBrokenLinks) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the output directory probed by the existing-file filter.
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Compile and install ignore patterns. A pattern that fails to compile
    /// is warned about and skipped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore = compile_ignore_patterns(patterns);
        self
    }

    /// Run the detection pass and apply the failure policy.
    ///
    /// Under the `ignore` policy nothing is computed at all. Otherwise the
    /// returned report carries every page that still has unmatched links;
    /// the `throw` policy additionally turns a non-empty report into an
    /// error carrying the rendered message.
    pub async fn check(
        &self,
        routes: &[Route],
        pages: Vec<PageLinks>,
    ) -> Result<BrokenLinkReport, BrokenLinksError> {
        if matches!(self.policy, OnBrokenLinks::Ignore) {
            tracing::debug!("Broken link detection disabled (policy: ignore)");
            return Ok(BrokenLinkReport::default());
        }

        let pages = self.drop_ignored_links(pages);
        let pages = filter_existing_files(pages, &self.base_url, &self.out_dir).await;

        tracing::debug!("Checking {} pages against route table", pages.len());
        let report = collect_broken_links(&pages, routes);

        if let Some(message) = render_report(&report) {
            self.apply_policy(with_policy_hint(&message))?;
        }

        Ok(report)
    }

    fn drop_ignored_links(&self, pages: Vec<PageLinks>) -> Vec<PageLinks> {
        if self.ignore.is_empty() {
            return pages;
        }
        pages
            .into_iter()
            .map(|mut page| {
                page.links
                    .retain(|link| !self.ignore.iter().any(|re| re.is_match(link)));
                page
            })
            .collect()
    }

    fn apply_policy(&self, message: String) -> Result<(), BrokenLinksError> {
        match self.policy {
            OnBrokenLinks::Ignore => Ok(()),
            OnBrokenLinks::Log => {
                tracing::info!("{}", message);
                Ok(())
            }
            OnBrokenLinks::Warn => {
                tracing::error!("{}", message);
                Ok(())
            }
            OnBrokenLinks::Throw => Err(BrokenLinksError(message)),
        }
    }
}

/// Resolve each page's links and keep those matching no leaf route.
///
/// Broken links appear in collected order; a page with none is omitted.
/// The pass is pure, so identical inputs always produce identical reports.
pub fn collect_broken_links(pages: &[PageLinks], routes: &[Route]) -> BrokenLinkReport {
    let leaves = leaf_routes(routes);

    let mut report = BrokenLinkReport::default();
    for page in pages {
        let broken: Vec<BrokenLink> = page
            .links
            .iter()
            .map(|link| {
                let resolved = resolve_pathname(path_component(link), &page.page);
                BrokenLink::new(link.clone(), resolved)
            })
            .filter(|candidate| !matches_any(&leaves, &candidate.resolved))
            .collect();

        if !broken.is_empty() {
            report.pages.push(PageReport {
                page: page.page.clone(),
                broken_links: broken,
            });
        }
    }
    report
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn with_policy_hint(message: &str) -> String {
    format!(
        "{}\nNote: it's possible to ignore broken links with the 'on_broken_links' configuration.\n\n",
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, links: &[&str]) -> PageLinks {
        PageLinks {
            page: path.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn sample_routes() -> Vec<Route> {
        vec![
            Route::leaf("/docs/intro"),
            Route::leaf("/docs/guide"),
            Route::leaf("*"),
        ]
    }

    #[test]
    fn test_collect_reports_unmatched_links() {
        let routes = sample_routes();
        let pages = vec![page("/docs/intro", &["/docs/guide", "/docs/missing"])];

        let report = collect_broken_links(&pages, &routes);
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].page, "/docs/intro");
        assert_eq!(
            report.pages[0].broken_links,
            vec![BrokenLink::new("/docs/missing", "/docs/missing")]
        );
    }

    #[test]
    fn test_collect_resolves_relative_links() {
        let routes = vec![Route::leaf("/docs/x")];
        let pages = vec![page("/docs/a/b", &["../x", "../../x"])];

        let report = collect_broken_links(&pages, &routes);
        // ../x resolves to /docs/x and matches; ../../x resolves to /x
        assert_eq!(
            report.pages[0].broken_links,
            vec![BrokenLink::new("../../x", "/x")]
        );
    }

    #[test]
    fn test_collect_strips_fragment_before_matching() {
        let routes = vec![Route::leaf("/docs/guide")];
        let pages = vec![page("/docs/intro", &["/docs/guide#setup", "/docs/missing#top"])];

        let report = collect_broken_links(&pages, &routes);
        assert_eq!(
            report.pages[0].broken_links,
            vec![BrokenLink::new("/docs/missing#top", "/docs/missing")]
        );
    }

    #[test]
    fn test_pages_without_broken_links_are_omitted() {
        let routes = sample_routes();
        let pages = vec![
            page("/docs/intro", &["/docs/guide"]),
            page("/docs/guide", &["/nowhere"]),
        ];

        let report = collect_broken_links(&pages, &routes);
        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].page, "/docs/guide");
    }

    #[test]
    fn test_branches_are_not_match_targets() {
        let routes = vec![Route::branch(
            "/docs",
            vec![Route::leaf("/docs/intro")],
        )];
        let pages = vec![page("/blog", &["/docs", "/docs/intro"])];

        let report = collect_broken_links(&pages, &routes);
        assert_eq!(
            report.pages[0].broken_links,
            vec![BrokenLink::new("/docs", "/docs")]
        );
    }

    #[test]
    fn test_collect_is_idempotent() {
        let routes = sample_routes();
        let pages = vec![page("/docs/intro", &["/docs/missing", "../other"])];

        let first = collect_broken_links(&pages, &routes);
        let second = collect_broken_links(&pages, &routes);
        assert_eq!(first.pages[0].broken_links, second.pages[0].broken_links);
    }

    #[tokio::test]
    async fn test_invalid_ignore_pattern_is_skipped() {
        let out = tempfile::TempDir::new().unwrap();
        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Throw)
            .with_ignore_patterns(&["[unclosed".to_string(), "^/generated/".to_string()]);
        let pages = vec![page("/docs/intro", &["/generated/api"])];

        // The malformed pattern is dropped; the valid one still applies
        let report = checker.check(&sample_routes(), pages).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_ignore_policy_short_circuits() {
        let out = tempfile::TempDir::new().unwrap();
        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Ignore);
        let pages = vec![page("/docs/intro", &["/definitely/broken"])];

        let report = checker.check(&sample_routes(), pages).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_throw_policy_fails_with_message() {
        let out = tempfile::TempDir::new().unwrap();
        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Throw);
        let pages = vec![page("/docs/intro", &["/docs/missing"])];

        let err = checker.check(&sample_routes(), pages).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Broken links found!"));
        assert!(message.contains("/docs/intro"));
        assert!(message.contains("/docs/missing"));
        assert!(message.contains("on_broken_links"));
    }

    #[tokio::test]
    async fn test_log_and_warn_policies_do_not_fail() {
        let out = tempfile::TempDir::new().unwrap();
        let pages = vec![page("/docs/intro", &["/docs/missing"])];

        for policy in [OnBrokenLinks::Log, OnBrokenLinks::Warn] {
            let checker = LinkChecker::new("/", out.path(), policy);
            let report = checker.check(&sample_routes(), pages.clone()).await.unwrap();
            assert_eq!(report.link_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_ignore_patterns_drop_links_before_checking() {
        let out = tempfile::TempDir::new().unwrap();
        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Throw)
            .with_ignore_patterns(&["^/generated/".to_string()]);
        let pages = vec![page("/docs/intro", &["/generated/api", "/docs/guide"])];

        let report = checker.check(&sample_routes(), pages).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_existing_file_is_never_reported() {
        let out = tempfile::TempDir::new().unwrap();
        std::fs::create_dir_all(out.path().join("files")).unwrap();
        std::fs::write(out.path().join("files/report.pdf"), b"pdf").unwrap();

        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Throw);
        let pages = vec![page("/docs/intro", &["/files/report.pdf#page=2"])];

        let report = checker.check(&sample_routes(), pages).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_empty_report_succeeds_under_throw() {
        let out = tempfile::TempDir::new().unwrap();
        let checker = LinkChecker::new("/", out.path(), OnBrokenLinks::Throw);
        let pages = vec![page("/docs/intro", &["/docs/guide"])];

        let report = checker.check(&sample_routes(), pages).await.unwrap();
        assert!(report.is_empty());
    }
}
