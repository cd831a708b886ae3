//! CLI command implementations.

pub mod check;
pub mod init;
pub mod routes;

pub use check::{check_links, CheckOptions};
pub use init::init_project;
pub use routes::list_routes;
