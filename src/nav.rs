//! Current location and the navigation loop.
//!
//! The guard decides one attempt at a time and never chases its own
//! redirects; re-triggering evaluation for a redirect target is the router's
//! job. [`Navigator`] plays that router role for headless shells: it owns
//! the current path in a shared [`Location`] cell, applies the guard, and
//! re-enters evaluation until a target is admitted.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::sync::{Arc, RwLock};

use crate::error::ClientError;
use crate::guard::{self, Decision};
use crate::routes::{self, RouteTable};
use crate::session::Credentials;

/// Redirect chains settle within a few hops under every credential state;
/// hitting this bound means the table and guard disagree and is reported as
/// a hard error rather than silently truncated.
const MAX_REDIRECTS: usize = 8;

/// Shared current-path cell. Cloned into the navigator and every API client
/// so expiry handling can pick the login route matching the area the user
/// is in.
#[derive(Clone, Debug)]
pub struct Location {
    path: Arc<RwLock<String>>,
}

impl Location {
    /// New location at the application root.
    #[must_use]
    pub fn new() -> Self {
        Self { path: Arc::new(RwLock::new("/".to_owned())) }
    }

    /// The current path.
    #[must_use]
    pub fn get(&self) -> String {
        self.path.read().expect("location poisoned").clone()
    }

    /// Overwrite the current path without consulting the guard.
    pub fn set(&self, path: &str) {
        *self.path.write().expect("location poisoned") = path.to_owned();
    }

    /// Whether the current path is inside the admin area.
    #[must_use]
    pub fn in_admin_area(&self) -> bool {
        routes::is_admin_area(&self.get())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

/// Router stand-in: evaluates the guard per navigation attempt and records
/// where the application settled.
pub struct Navigator {
    table: RouteTable,
    credentials: Credentials,
    location: Location,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable, credentials: Credentials, location: Location) -> Self {
        Self { table, credentials, location }
    }

    /// Evaluate a single attempt without moving. The application root is a
    /// route-level redirect to the login page, applied before the guard
    /// sees the path.
    #[must_use]
    pub fn check(&self, target: &str) -> Decision {
        let target = if target == "/" { routes::LOGIN } else { target };
        guard::evaluate(&self.table, &self.credentials, target)
    }

    /// Navigate to `target`, following guard redirects until a target is
    /// admitted, then update the current location and return the settled
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RedirectLoop`] if the chain exceeds
    /// [`MAX_REDIRECTS`] hops.
    pub fn navigate(&self, target: &str) -> Result<String, ClientError> {
        let mut current = if target == "/" { routes::LOGIN.to_owned() } else { target.to_owned() };
        for _ in 0..MAX_REDIRECTS {
            match guard::evaluate(&self.table, &self.credentials, &current) {
                Decision::Admit => {
                    tracing::debug!(requested = target, settled = %current, "navigation admitted");
                    self.location.set(&current);
                    return Ok(current);
                }
                Decision::Redirect(next) => {
                    tracing::debug!(from = %current, to = next, "navigation redirected");
                    current = next.to_owned();
                }
            }
        }
        Err(ClientError::RedirectLoop(target.to_owned()))
    }

    /// The shared location cell.
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }
}
