//! # siteproof-core
//!
//! Core library for the siteproof documentation link checker.
//!
//! This crate provides the building blocks for loading build manifests,
//! flattening route trees, resolving collected links, and reporting the ones
//! that point nowhere.

pub mod checker;
pub mod config;
pub mod files;
pub mod manifest;
pub mod matcher;
pub mod report;
pub mod resolve;
pub mod routes;

pub use checker::{collect_broken_links, BrokenLinksError, LinkChecker};
pub use config::{Config, ConfigError, OnBrokenLinks};
pub use manifest::{load_links, load_routes, ManifestError, PageLinks};
pub use report::{render_report, BrokenLink, BrokenLinkReport, PageReport};
pub use routes::{leaf_routes, LeafRoute, Route};
