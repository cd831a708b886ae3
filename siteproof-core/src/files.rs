//! Filter that drops links pointing at files present in the build output.
//!
//! Static assets (downloads, images) are copied into the output tree without
//! being registered as routes. A link to such a file is valid, so it is
//! removed from the candidate list before route matching.

use crate::manifest::PageLinks;
use crate::resolve::path_component;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Upper bound on concurrently outstanding existence probes.
const MAX_CONCURRENT_PROBES: usize = 64;

/// Map a link onto its candidate file path under the output directory.
///
/// The base URL prefix is stripped once when present; any remaining leading
/// slash is trimmed so the join stays inside `out_dir`.
fn candidate_file_path(out_dir: &Path, base_url: &str, link: &str) -> PathBuf {
    let stripped = link.strip_prefix(base_url).unwrap_or(link);
    out_dir.join(stripped.trim_start_matches('/'))
}

/// Remove links whose target file physically exists under `out_dir`.
///
/// Probes run as a concurrent batch with a bounded number outstanding.
/// Surviving links keep their collected order because results are recombined
/// by input position, not completion order. A probe that fails to read the
/// filesystem counts as "does not exist", leaving the link subject to route
/// matching.
pub async fn filter_existing_files(
    pages: Vec<PageLinks>,
    base_url: &str,
    out_dir: &Path,
) -> Vec<PageLinks> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_PROBES));
    let mut filtered = Vec::with_capacity(pages.len());

    for page in pages {
        let PageLinks { page: page_path, links: raw_links } = page;

        let mut probes = Vec::with_capacity(raw_links.len());
        for link in &raw_links {
            // The probe ignores any fragment or query suffix on the link
            let path = candidate_file_path(out_dir, base_url, path_component(link));
            let semaphore = semaphore.clone();
            probes.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                tokio::fs::try_exists(&path).await.unwrap_or(false)
            }));
        }

        let mut results = Vec::with_capacity(probes.len());
        for probe in probes {
            results.push(probe.await.unwrap_or(false));
        }

        let mut links = Vec::with_capacity(raw_links.len());
        for (link, exists) in raw_links.into_iter().zip(results) {
            if exists {
                tracing::debug!("Link {} on {} is an existing output file", link, page_path);
            } else {
                links.push(link);
            }
        }

        filtered.push(PageLinks { page: page_path, links });
    }

    filtered
}
