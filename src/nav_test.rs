use super::*;
use crate::routes::{ADMIN_HOME, ADMIN_LOGIN, DASHBOARD, LOGIN};
use crate::session::{Role, Slot};

fn navigator(credentials: Credentials) -> Navigator {
    Navigator::new(RouteTable::standard(), credentials, Location::new())
}

#[test]
fn anonymous_dashboard_settles_at_login() {
    let nav = navigator(Credentials::new());
    let settled = nav.navigate("/dashboard/health-data").unwrap();
    assert_eq!(settled, LOGIN);
    assert_eq!(nav.location().get(), LOGIN);
}

#[test]
fn root_redirects_to_login() {
    let nav = navigator(Credentials::new());
    assert_eq!(nav.navigate("/").unwrap(), LOGIN);
}

#[test]
fn admin_browsing_user_area_settles_at_admin_root() {
    let credentials = Credentials::new();
    credentials.set(Slot::Admin, "admin-token", Role::Admin);
    let nav = navigator(credentials);
    assert_eq!(nav.navigate("/dashboard/profile").unwrap(), ADMIN_HOME);
    assert!(nav.location().in_admin_area());
}

#[test]
fn signed_in_user_login_page_settles_at_dashboard() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    let nav = navigator(credentials);
    assert_eq!(nav.navigate(LOGIN).unwrap(), DASHBOARD);
}

#[test]
fn user_reaching_admin_child_settles_at_admin_login() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    let nav = navigator(credentials);
    assert_eq!(nav.navigate("/admin/users").unwrap(), ADMIN_LOGIN);
}

#[test]
fn check_does_not_move() {
    let nav = navigator(Credentials::new());
    assert_eq!(nav.check("/dashboard"), guard::Decision::Redirect(LOGIN));
    assert_eq!(nav.location().get(), "/");
}

#[test]
fn every_state_settles_within_bound() {
    // The chain bound exists for table bugs; the shipped table converges
    // from every entry point under each session shape.
    let anonymous = Credentials::new();
    let user = Credentials::new();
    user.set(Slot::User, "u", Role::User);
    let admin = Credentials::new();
    admin.set(Slot::Admin, "a", Role::Admin);

    for credentials in [anonymous, user, admin] {
        let nav = navigator(credentials);
        for target in ["/", LOGIN, "/register", ADMIN_LOGIN, DASHBOARD, ADMIN_HOME, "/dashboard/ai-chat", "/admin/users"] {
            nav.navigate(target).unwrap();
        }
    }
}

#[test]
fn location_tracks_admin_area() {
    let location = Location::new();
    assert!(!location.in_admin_area());
    location.set("/admin/users");
    assert!(location.in_admin_area());
    location.set(ADMIN_LOGIN);
    assert!(!location.in_admin_area());
}
