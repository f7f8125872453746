use reqwest::Url;
use std::collections::BTreeMap;

/// Screen rendered for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Trips,
    TripForm,
    Buses,
    BusForm,
    Departures,
    Users,
    UserForm,
    NotFound,
}

/// Route definition as written in the route table. Child paths without a
/// leading `/` are relative to the parent.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub path: String,
    pub name: Option<String>,
    pub view: View,
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    pub fn new(path: &str, name: &str, view: View) -> Self {
        Self {
            path: path.to_string(),
            name: Some(name.to_string()),
            view,
            requires_auth: false,
            requires_admin: false,
            children: Vec::new(),
        }
    }

    pub fn requires_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Admin routes always need a session too.
    pub fn requires_admin(mut self) -> Self {
        self.requires_auth = true;
        self.requires_admin = true;
        self
    }

    pub fn with_children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

/// One entry of a matched chain, with its path already joined to its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub name: Option<String>,
    pub view: View,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub full_path: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    /// Outermost record first, leaf last.
    pub matched: Vec<RouteDescriptor>,
}

impl ResolvedRoute {
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|record| record.requires_auth)
    }

    pub fn requires_admin(&self) -> bool {
        self.matched.iter().any(|record| record.requires_admin)
    }

    pub fn leaf(&self) -> Option<&RouteDescriptor> {
        self.matched.last()
    }

    pub fn name(&self) -> Option<&str> {
        self.leaf().and_then(|record| record.name.as_deref())
    }
}

/// Base used only to borrow `Url`'s path and query handling.
pub(crate) const LOCATION_BASE: &str = "http://console.local/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    /// Renders `path?key=value` with the query form-urlencoded.
    pub fn href(&self) -> String {
        let mut url = match Url::parse(LOCATION_BASE).and_then(|base| base.join(&self.path)) {
            Ok(url) => url,
            Err(_) => return self.path.clone(),
        };
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }
}

/// Guard verdict for a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(Location),
}
