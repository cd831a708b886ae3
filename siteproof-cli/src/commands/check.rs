//! Check command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use siteproof_core::{
    load_links, load_routes, BrokenLinkReport, Config, LinkChecker, OnBrokenLinks,
};
use std::path::{Path, PathBuf};

pub struct CheckOptions {
    pub routes_manifest: Option<PathBuf>,
    pub links_manifest: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub policy: Option<OnBrokenLinks>,
    pub json: bool,
}

#[derive(Serialize)]
struct CheckSummary<'a> {
    pages_checked: usize,
    broken_links: usize,
    policy: &'a str,
    report: &'a BrokenLinkReport,
}

/// Load the build manifests, run the detection pass, and apply the policy.
///
/// Under the `throw` policy a non-empty report propagates as an error, which
/// exits the process with a non-zero status.
pub async fn check_links(config_path: &Path, opts: CheckOptions) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let routes_path = opts
        .routes_manifest
        .unwrap_or_else(|| config.routes_manifest_path());
    let links_path = opts
        .links_manifest
        .unwrap_or_else(|| config.links_manifest_path());

    let routes = load_routes(&routes_path)
        .with_context(|| format!("Failed to load route manifest {:?}", routes_path))?;
    let pages = load_links(&links_path)
        .with_context(|| format!("Failed to load link manifest {:?}", links_path))?;

    tracing::info!("Loaded {} routes and {} pages", routes.len(), pages.len());

    let policy = opts.policy.unwrap_or(config.on_broken_links);
    let mut checker = LinkChecker::from_config(&config).with_policy(policy);
    if let Some(out_dir) = opts.out_dir {
        checker = checker.with_out_dir(out_dir);
    }

    let pages_checked = pages.len();
    let report = checker.check(&routes, pages).await?;

    if opts.json {
        let summary = CheckSummary {
            pages_checked,
            broken_links: report.link_count(),
            policy: policy.as_str(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if matches!(policy, OnBrokenLinks::Ignore) {
        println!("Link checking skipped (policy: ignore)");
    } else if report.is_empty() {
        println!("✓ No broken links found across {} pages", pages_checked);
    } else {
        println!(
            "Found {} broken links on {} pages (policy: {})",
            report.link_count(),
            report.pages.len(),
            policy.as_str()
        );
    }

    Ok(())
}
