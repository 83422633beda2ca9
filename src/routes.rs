//! Static route table.
//!
//! DESIGN
//! ======
//! Route metadata lives in one immutable table built at startup. The guard
//! looks descriptors up by path on every transition; parameterized paths
//! (`article/:id`) match segment-wise. Child routes under `/dashboard` and
//! `/admin` carry `requires_auth` themselves instead of inheriting it from
//! the parent record, while `requires_admin` is set only on the `/admin`
//! root; the guard's admin-area prefix rule covers the children.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// General login page.
pub const LOGIN: &str = "/login";
/// Registration page.
pub const REGISTER: &str = "/register";
/// Administrator login page.
pub const ADMIN_LOGIN: &str = "/admin/login";
/// Regular-user dashboard root.
pub const DASHBOARD: &str = "/dashboard";
/// Admin dashboard root.
pub const ADMIN_HOME: &str = "/admin";

/// Immutable per-route metadata consumed by the guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Path pattern; `:name` segments match any single non-empty segment.
    pub path: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const fn open(path: &'static str) -> RouteDescriptor {
    RouteDescriptor { path, requires_auth: false, requires_admin: false }
}

const fn authed(path: &'static str) -> RouteDescriptor {
    RouteDescriptor { path, requires_auth: true, requires_admin: false }
}

const fn admin(path: &'static str) -> RouteDescriptor {
    RouteDescriptor { path, requires_auth: true, requires_admin: true }
}

const ROUTES: &[RouteDescriptor] = &[
    open(LOGIN),
    open(REGISTER),
    open(ADMIN_LOGIN),
    authed(DASHBOARD),
    authed("/dashboard/health-data"),
    authed("/dashboard/ai-chat"),
    authed("/dashboard/ai-assistant"),
    authed("/dashboard/knowledge-center"),
    authed("/dashboard/knowledge-center/article/:id"),
    authed("/dashboard/profile"),
    admin(ADMIN_HOME),
    authed("/admin/users"),
    authed("/admin/health-data"),
    authed("/admin/ai-chat"),
    authed("/admin/articles"),
    authed("/admin/settings"),
    authed("/admin/logs"),
];

/// The application's route table, immutable for the process lifetime.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl RouteTable {
    /// The standard Vitalboard route table.
    #[must_use]
    pub fn standard() -> Self {
        Self { routes: ROUTES }
    }

    /// Look up the descriptor matching `path`, if any.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| matches(route.path, path))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whether `path` lies inside the admin area.
///
/// The admin login page is excluded: it must stay reachable without an admin
/// credential, otherwise the guard's admin-area rule would redirect the login
/// page to itself.
#[must_use]
pub fn is_admin_area(path: &str) -> bool {
    if path == ADMIN_LOGIN {
        return false;
    }
    path == ADMIN_HOME || path.starts_with("/admin/")
}

fn matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if expected.starts_with(':') {
                    if actual.is_empty() {
                        return false;
                    }
                } else if expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}
