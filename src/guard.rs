//! Navigation guard.
//!
//! DECISION ORDER
//! ==============
//! The guard is a pure function over the route table and the credential
//! store, evaluated once per navigation attempt. Rules are checked in a
//! fixed precedence and the first match wins; later rules are unreachable
//! once an earlier one fires, and several rules are only correct because of
//! that ordering (rule 1 catches anonymous visitors before the admin-area
//! rules ever look at them).
//!
//! 1. Target requires auth, neither slot present: redirect to login.
//! 2. Target requires admin, admin slot absent: redirect to admin login.
//! 3. Target inside the admin area, admin slot absent: redirect to admin
//!    login. Covers admin child routes whose descriptors leave
//!    `requires_admin` unset.
//! 4. Target outside the admin area while the active role is admin and the
//!    admin slot is present: redirect to the admin root. An authenticated
//!    administrator does not browse the regular-user area.
//! 5. Target is the login page with a user credential present: redirect to
//!    the dashboard.
//! 6. Same for the registration page.
//! 7. Target is the admin login page with an admin credential present:
//!    redirect to the admin root.
//! 8. Admit.
//!
//! The outcome is always admit or a single redirect. The guard never chases
//! the redirect target itself; the router re-triggers evaluation for the new
//! target on its own.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::{self, RouteTable};
use crate::session::{Credentials, Role, Slot};

/// Terminal outcome of one guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Redirect(&'static str),
}

/// Evaluate a navigation attempt against the route table and the current
/// credential state.
#[must_use]
pub fn evaluate(table: &RouteTable, credentials: &Credentials, target: &str) -> Decision {
    let descriptor = table.find(target);
    let requires_auth = descriptor.is_some_and(|route| route.requires_auth);
    let requires_admin = descriptor.is_some_and(|route| route.requires_admin);
    let user = credentials.get(Slot::User);
    let admin = credentials.get(Slot::Admin);

    if requires_auth && user.is_none() && admin.is_none() {
        return Decision::Redirect(routes::LOGIN);
    }

    if requires_admin && admin.is_none() {
        return Decision::Redirect(routes::ADMIN_LOGIN);
    }

    if routes::is_admin_area(target) && admin.is_none() {
        return Decision::Redirect(routes::ADMIN_LOGIN);
    }

    if !routes::is_admin_area(target)
        && credentials.active_role() == Some(Role::Admin)
        && admin.is_some()
    {
        return Decision::Redirect(routes::ADMIN_HOME);
    }

    if target == routes::LOGIN && user.is_some() {
        return Decision::Redirect(routes::DASHBOARD);
    }

    if target == routes::REGISTER && user.is_some() {
        return Decision::Redirect(routes::DASHBOARD);
    }

    if target == routes::ADMIN_LOGIN && admin.is_some() {
        return Decision::Redirect(routes::ADMIN_HOME);
    }

    Decision::Admit
}
