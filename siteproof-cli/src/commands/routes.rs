//! Routes command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use siteproof_core::{leaf_routes, load_routes, Config};
use std::path::Path;

#[derive(Serialize)]
struct RouteListing<'a> {
    total: usize,
    routes: Vec<&'a str>,
}

/// List the leaf routes that participate in link matching.
///
/// Branches and the top-level catch-all are expanded away, so this shows
/// exactly what a resolved link can match against.
pub fn list_routes(config_path: &Path, manifest: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let manifest_path = manifest
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.routes_manifest_path());

    let routes = load_routes(&manifest_path)
        .with_context(|| format!("Failed to load route manifest {:?}", manifest_path))?;
    let leaves = leaf_routes(&routes);

    if json {
        let listing = RouteListing {
            total: leaves.len(),
            routes: leaves.iter().map(|l| l.path.as_str()).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        println!("{} leaf routes eligible for matching:", leaves.len());
        for leaf in &leaves {
            println!("- {}", leaf.path);
        }
    }

    Ok(())
}
