use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Url;
use tracing::{debug, info};

use super::session::SessionStore;
use crate::core::guard;
use crate::core::parser::{join_path, parse_pattern, split_path, RoutePattern};
use crate::models::{
    Navigation, NavigationError, ResolvedRoute, RouteDescriptor, RouteError, RouteRecord,
    LOCATION_BASE,
};

/// Redirect hops allowed in a single `push` before giving up.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug)]
struct CompiledRoute {
    pattern: RoutePattern,
    chain: Vec<RouteDescriptor>,
}

/// Flattened, parsed route table. Matching follows declaration order, parents
/// before their children.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

fn compile(
    record: &RouteRecord,
    parent_path: &str,
    parents: &[RouteDescriptor],
    out: &mut Vec<CompiledRoute>,
) -> Result<(), RouteError> {
    let path = if parents.is_empty() {
        record.path.clone()
    } else {
        join_path(parent_path, &record.path)
    };
    let pattern = parse_pattern(&path)?;

    let mut chain = parents.to_vec();
    chain.push(RouteDescriptor {
        path: path.clone(),
        name: record.name.clone(),
        view: record.view,
        requires_auth: record.requires_auth,
        requires_admin: record.requires_admin,
    });

    out.push(CompiledRoute {
        pattern,
        chain: chain.clone(),
    });
    for child in &record.children {
        compile(child, &path, &chain, out)?;
    }
    Ok(())
}

impl RouteTable {
    pub fn new(records: &[RouteRecord]) -> Result<Self, RouteError> {
        let mut routes = Vec::new();
        for record in records {
            compile(record, "", &[], &mut routes)?;
        }
        Ok(Self { routes })
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().filter_map(|route| route.chain.last())
    }

    /// Resolves `location` (path plus optional query) to its matched chain.
    /// Only absolute paths inside the console are accepted.
    pub fn resolve(&self, location: &str) -> Result<ResolvedRoute, NavigationError> {
        let invalid = || NavigationError::InvalidLocation(location.to_string());
        if !location.starts_with('/') {
            return Err(invalid());
        }
        let base = Url::parse(LOCATION_BASE).map_err(|_| invalid())?;
        let url = base.join(location).map_err(|_| invalid())?;
        if url.origin() != base.origin() {
            return Err(invalid());
        }
        let path = url.path().to_string();
        let query: BTreeMap<String, String> = url.query_pairs().into_owned().collect();
        let full_path = match url.query() {
            Some(q) => format!("{}?{}", path, q),
            None => path.clone(),
        };

        let segments = split_path(&path);
        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| ResolvedRoute {
                    full_path: full_path.clone(),
                    path: path.clone(),
                    params,
                    query: query.clone(),
                    matched: route.chain.clone(),
                })
            })
            .ok_or(NavigationError::NoMatch(full_path))
    }
}

/// Owns the route table and the current route; every transition passes the guard.
pub struct Router {
    table: RouteTable,
    session: Arc<SessionStore>,
    current: Mutex<Option<ResolvedRoute>>,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<SessionStore>) -> Self {
        Self {
            table,
            session,
            current: Mutex::new(None),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> Option<ResolvedRoute> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Guard verdict for `location` without moving there.
    pub fn check(&self, location: &str) -> Result<Navigation, NavigationError> {
        let to = self.table.resolve(location)?;
        self.session.expire_if_due();
        Ok(guard::evaluate(&to, &self.session.session()))
    }

    /// Navigates to `location`, following guard redirects until a route is allowed.
    pub fn push(&self, location: &str) -> Result<ResolvedRoute, NavigationError> {
        let from = self.current().map(|route| route.full_path);
        debug!("Navigating from {:?} to {}", from, location);

        let mut target = location.to_string();
        for _ in 0..=MAX_REDIRECTS {
            let to = self.table.resolve(&target)?;
            self.session.expire_if_due();
            match guard::evaluate(&to, &self.session.session()) {
                Navigation::Allow => {
                    info!("Navigated to {}", to.full_path);
                    *self.current.lock().unwrap_or_else(PoisonError::into_inner) =
                        Some(to.clone());
                    return Ok(to);
                }
                Navigation::Redirect(next) => {
                    debug!("Redirected from {} to {}", to.full_path, next.href());
                    target = next.href();
                }
            }
        }
        Err(NavigationError::RedirectLoop(location.to_string()))
    }
}
