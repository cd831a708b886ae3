//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../siteproof.yml.example");

const SAMPLE_ROUTES: &str = r#"[
  {
    "path": "/docs",
    "routes": [
      { "path": "/docs/intro", "exact": true },
      { "path": "/docs/guide", "exact": true }
    ]
  },
  { "path": "/", "exact": true },
  { "path": "*" }
]
"#;

const SAMPLE_LINKS: &str = r#"[
  { "page": "/docs/intro", "links": ["/docs/guide", "/"] },
  { "page": "/docs/guide", "links": ["./intro"] }
]
"#;

/// Initialize a new siteproof project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_manifests(root)?;

    println!("✓ siteproof initialized in {:?}", root);
    println!("  - Edit siteproof.yml to point at your build artifacts");
    println!("  - Run `siteproof check` after each site build");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("siteproof.yml");
    if config_path.exists() {
        println!("siteproof.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_manifests(root: &Path) -> Result<()> {
    let manifests = root.join("manifests");
    let output = root.join("output");

    for dir in [&manifests, &output] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    // Starter manifests with every link registered, so `siteproof check`
    // passes until real build artifacts replace them
    let routes = manifests.join("routes.json");
    if !routes.exists() {
        fs::write(&routes, SAMPLE_ROUTES)?;
        println!("Created {:?}", routes);
    }

    let links = manifests.join("links.json");
    if !links.exists() {
        fs::write(&links, SAMPLE_LINKS)?;
        println!("Created {:?}", links);
    }

    Ok(())
}
