use std::time::Duration;

use super::*;
use crate::session::{Role, SessionEvent};

fn client(preference: TokenPreference, credentials: &Credentials, location: &Location) -> ApiClient {
    let config = Config::new("http://127.0.0.1:8000/api/").unwrap();
    ApiClient::new(&config, preference, Duration::from_secs(10), credentials.clone(), location.clone()).unwrap()
}

#[test]
fn client_base_url_has_no_trailing_slash() {
    let client = client(TokenPreference::UserThenAdmin, &Credentials::new(), &Location::new());
    assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
}

// =============================================================
// Token resolution
// =============================================================

#[test]
fn user_preferring_client_picks_user_slot_first() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    credentials.set(Slot::Admin, "admin-token", Role::Admin);
    let (slot, token) = TokenPreference::UserThenAdmin.resolve(&credentials).unwrap();
    assert_eq!(slot, Slot::User);
    assert_eq!(token, "user-token");
}

#[test]
fn user_preferring_client_falls_back_to_admin_slot() {
    // An administrator reads non-admin-scoped endpoints without a separate
    // user login.
    let credentials = Credentials::new();
    credentials.set(Slot::Admin, "admin-token", Role::Admin);
    let (slot, token) = TokenPreference::UserThenAdmin.resolve(&credentials).unwrap();
    assert_eq!(slot, Slot::Admin);
    assert_eq!(token, "admin-token");
}

#[test]
fn admin_only_client_never_uses_user_slot() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    assert!(TokenPreference::AdminOnly.resolve(&credentials).is_none());
}

#[test]
fn anonymous_resolution_is_empty() {
    let credentials = Credentials::new();
    assert!(TokenPreference::UserThenAdmin.resolve(&credentials).is_none());
    assert!(TokenPreference::AdminOnly.resolve(&credentials).is_none());
}

// =============================================================
// Authorization-failure policy
// =============================================================

#[test]
fn expiry_in_admin_area_evicts_admin_and_targets_admin_login() {
    let credentials = Credentials::new();
    credentials.set(Slot::Admin, "admin-token", Role::Admin);
    let location = Location::new();
    location.set("/admin/users");
    let mut events = credentials.subscribe();

    let client = client(TokenPreference::AdminOnly, &credentials, &location);
    let error = client.handle_unauthorized(Some(Slot::Admin));

    assert!(matches!(error, ClientError::AuthExpired { slot: Slot::Admin }));
    assert!(credentials.get(Slot::Admin).is_none());
    assert_eq!(credentials.role(), None);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::AuthExpired { slot: Slot::Admin, redirect: routes::ADMIN_LOGIN }
    );
}

#[test]
fn expiry_outside_admin_area_targets_general_login() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    let location = Location::new();
    location.set("/dashboard/health-data");
    let mut events = credentials.subscribe();

    let client = client(TokenPreference::UserThenAdmin, &credentials, &location);
    let error = client.handle_unauthorized(Some(Slot::User));

    assert!(matches!(error, ClientError::AuthExpired { slot: Slot::User }));
    assert!(credentials.get(Slot::User).is_none());
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::AuthExpired { slot: Slot::User, redirect: routes::LOGIN }
    );
}

#[test]
fn expiry_with_nothing_attached_blames_primary_slot() {
    // The server can reject an unauthenticated call with 401; the eviction
    // is a no-op but subscribers still learn where to navigate.
    let credentials = Credentials::new();
    let location = Location::new();
    let mut events = credentials.subscribe();

    let client = client(TokenPreference::UserThenAdmin, &credentials, &location);
    let error = client.handle_unauthorized(None);

    assert!(matches!(error, ClientError::AuthExpired { slot: Slot::User }));
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::AuthExpired { slot: Slot::User, redirect: routes::LOGIN }
    );
}

#[test]
fn expiry_leaves_other_slot_alone() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "user-token", Role::User);
    credentials.set(Slot::Admin, "admin-token", Role::Admin);
    let location = Location::new();
    location.set("/dashboard/knowledge-center");

    let client = client(TokenPreference::UserThenAdmin, &credentials, &location);
    let _ = client.handle_unauthorized(Some(Slot::User));

    assert!(credentials.get(Slot::User).is_none());
    assert_eq!(credentials.get(Slot::Admin).unwrap().token, "admin-token");
}

// =============================================================
// Error normalization
// =============================================================

#[test]
fn error_detail_prefers_backend_detail_field() {
    let body = serde_json::json!({ "detail": "账号已被禁用" });
    assert_eq!(error_detail(&body), "账号已被禁用");
}

#[test]
fn error_detail_falls_back_to_raw_body() {
    let body = serde_json::json!({ "unexpected": true });
    assert_eq!(error_detail(&body), r#"{"unexpected":true}"#);
}
