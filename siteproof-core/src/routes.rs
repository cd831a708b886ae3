//! Route tree model and leaf flattening.

/// Path pattern of the wildcard catch-all route.
pub const CATCH_ALL: &str = "*";

/// A node in the site's routing tree.
///
/// Branches are prefix/layout routes and are never match targets, since a
/// branch pattern would spuriously match every link beneath it. Only leaves
/// take part in link matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Leaf(LeafRoute),
    Branch { path: String, children: Vec<Route> },
}

/// A route with no children, the only kind eligible for link matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafRoute {
    pub path: String,
}

impl LeafRoute {
    pub fn new(path: impl Into<String>) -> Self {
        LeafRoute { path: path.into() }
    }
}

impl Route {
    pub fn leaf(path: impl Into<String>) -> Self {
        Route::Leaf(LeafRoute::new(path))
    }

    pub fn branch(path: impl Into<String>, children: Vec<Route>) -> Self {
        Route::Branch {
            path: path.into(),
            children,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Leaf(leaf) => &leaf.path,
            Route::Branch { path, .. } => path,
        }
    }
}

/// Flatten a route tree into its leaf routes.
///
/// Top-level catch-all (`*`) routes are removed first; the rest expand
/// depth-first, left to right. A wildcard route nested deeper in the tree is
/// kept as an ordinary leaf (upstream routers leave those in place, and so
/// do we).
pub fn leaf_routes(routes: &[Route]) -> Vec<&LeafRoute> {
    let mut leaves = Vec::new();
    for route in routes.iter().filter(|r| r.path() != CATCH_ALL) {
        collect_leaves(route, &mut leaves);
    }
    leaves
}

fn collect_leaves<'a>(route: &'a Route, leaves: &mut Vec<&'a LeafRoute>) {
    match route {
        Route::Leaf(leaf) => leaves.push(leaf),
        Route::Branch { children, .. } => {
            for child in children {
                collect_leaves(child, leaves);
            }
        }
    }
}
