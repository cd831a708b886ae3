//! Build manifests produced by the site-build phase.
//!
//! The route manifest (`routes.json`) is an ordered array of nodes shaped
//! `{path, routes?}`, where `routes` nests child nodes recursively. The link
//! manifest (`links.json`) is an ordered array of `{page, links}` entries.
//! Auxiliary keys from the build phase (components, metadata) are ignored.

use crate::routes::Route;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One page's outgoing links, in the order they were collected during
/// rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct PageLinks {
    pub page: String,
    pub links: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    path: String,
    routes: Option<Vec<RawRoute>>,
}

impl From<RawRoute> for Route {
    fn from(raw: RawRoute) -> Self {
        // A present `routes` key marks a branch even when the array is
        // empty; only an absent key is a leaf
        match raw.routes {
            Some(children) => {
                Route::branch(raw.path, children.into_iter().map(Route::from).collect())
            }
            None => Route::leaf(raw.path),
        }
    }
}

/// Load the route tree from a `routes.json` manifest.
pub fn load_routes(path: &Path) -> Result<Vec<Route>, ManifestError> {
    let data = fs::read_to_string(path)?;
    let raw: Vec<RawRoute> = serde_json::from_str(&data)?;
    Ok(raw.into_iter().map(Route::from).collect())
}

/// Load per-page collected links from a `links.json` manifest.
pub fn load_links(path: &Path) -> Result<Vec<PageLinks>, ManifestError> {
    let data = fs::read_to_string(path)?;
    let pages: Vec<PageLinks> = serde_json::from_str(&data)?;
    Ok(pages)
}
