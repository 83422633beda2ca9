use super::*;
use crate::routes;

fn store_with(user: bool, admin: bool) -> Credentials {
    let credentials = Credentials::new();
    if user {
        credentials.set(Slot::User, "user-token", Role::User);
    }
    if admin {
        credentials.set(Slot::Admin, "admin-token", Role::Admin);
    }
    credentials
}

// =============================================================
// Slot reads and writes
// =============================================================

#[test]
fn set_then_get_round_trips() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "abc", Role::User);
    let stored = credentials.get(Slot::User).unwrap();
    assert_eq!(stored.token, "abc");
    assert_eq!(stored.role, Role::User);
    assert!(credentials.get(Slot::Admin).is_none());
}

#[test]
fn slots_are_independent() {
    let credentials = store_with(true, true);
    credentials.clear(Slot::User);
    assert!(credentials.get(Slot::User).is_none());
    assert_eq!(credentials.get(Slot::Admin).unwrap().token, "admin-token");
}

#[test]
fn set_updates_role_indicator() {
    let credentials = Credentials::new();
    credentials.set(Slot::User, "u", Role::User);
    assert_eq!(credentials.role(), Some(Role::User));
    credentials.set(Slot::Admin, "a", Role::Admin);
    assert_eq!(credentials.role(), Some(Role::Admin));
}

#[test]
fn clear_drops_indicator_only_for_indicated_role() {
    let credentials = store_with(true, true);
    // Indicator points at admin (last write).
    credentials.clear(Slot::User);
    assert_eq!(credentials.role(), Some(Role::Admin));
    credentials.clear(Slot::Admin);
    assert_eq!(credentials.role(), None);
}

#[test]
fn clear_drops_display_name() {
    let credentials = store_with(true, false);
    credentials.set_display_name(Slot::User, "alice");
    credentials.clear(Slot::User);
    assert!(credentials.display_name(Slot::User).is_none());
}

#[test]
fn clear_all_resets_everything() {
    let credentials = store_with(true, true);
    credentials.set_display_name(Slot::User, "alice");
    credentials.set_display_name(Slot::Admin, "root");
    credentials.clear_all();
    assert_eq!(credentials.state(), SessionState::Anonymous);
    assert_eq!(credentials.role(), None);
    assert!(credentials.display_name(Slot::User).is_none());
    assert!(credentials.display_name(Slot::Admin).is_none());
}

// =============================================================
// Derived state
// =============================================================

#[test]
fn state_derives_from_slot_presence() {
    assert_eq!(store_with(false, false).state(), SessionState::Anonymous);
    assert_eq!(store_with(true, false).state(), SessionState::User);
    assert_eq!(store_with(false, true).state(), SessionState::Admin);
    assert_eq!(store_with(true, true).state(), SessionState::Dual);
}

#[test]
fn active_role_prefers_indicator() {
    let credentials = store_with(true, true);
    credentials.set(Slot::User, "u2", Role::User);
    // Indicator now says user even though an admin credential is present.
    assert_eq!(credentials.active_role(), Some(Role::User));
}

#[test]
fn active_role_derivation_admin_wins() {
    // Dual credentials with the indicator lost to a partial clear.
    let credentials = store_with(true, true);
    let mut snapshot = credentials.snapshot();
    snapshot.role = None;
    credentials.restore(snapshot);

    assert_eq!(credentials.state(), SessionState::Dual);
    assert_eq!(credentials.role(), None);
    assert_eq!(credentials.active_role(), Some(Role::Admin));
}

#[test]
fn active_role_derivation_single_slot() {
    let credentials = store_with(true, false);
    let mut snapshot = credentials.snapshot();
    snapshot.role = None;
    credentials.restore(snapshot);
    assert_eq!(credentials.active_role(), Some(Role::User));

    assert_eq!(Credentials::new().active_role(), None);
}

#[test]
fn role_from_subject_maps_admin_variants() {
    assert_eq!(Role::from_subject("admin"), Role::Admin);
    assert_eq!(Role::from_subject("super_admin"), Role::Admin);
    assert_eq!(Role::from_subject("user"), Role::User);
    assert_eq!(Role::from_subject("anything-else"), Role::User);
}

// =============================================================
// Expiry events
// =============================================================

#[test]
fn expire_clears_slot_and_notifies() {
    let credentials = store_with(false, true);
    let mut events = credentials.subscribe();
    credentials.expire(Slot::Admin, routes::ADMIN_LOGIN);

    assert!(credentials.get(Slot::Admin).is_none());
    assert_eq!(credentials.role(), None);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::AuthExpired { slot: Slot::Admin, redirect: routes::ADMIN_LOGIN }
    );
    assert!(events.try_recv().is_err());
}

#[test]
fn expire_reaches_every_subscriber() {
    let credentials = store_with(true, false);
    let mut first = credentials.subscribe();
    let mut second = credentials.subscribe();
    credentials.expire(Slot::User, routes::LOGIN);
    assert!(first.try_recv().is_ok());
    assert!(second.try_recv().is_ok());
}

#[test]
fn dropped_subscriber_does_not_block_emit() {
    let credentials = store_with(true, false);
    drop(credentials.subscribe());
    let mut live = credentials.subscribe();
    credentials.expire(Slot::User, routes::LOGIN);
    assert!(live.try_recv().is_ok());
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn snapshot_restore_round_trips() {
    let credentials = store_with(true, true);
    credentials.set_display_name(Slot::User, "alice");

    let restored = Credentials::new();
    restored.restore(credentials.snapshot());

    assert_eq!(restored.get(Slot::User), credentials.get(Slot::User));
    assert_eq!(restored.get(Slot::Admin), credentials.get(Slot::Admin));
    assert_eq!(restored.role(), credentials.role());
    assert_eq!(restored.display_name(Slot::User), Some("alice".into()));
}

#[test]
fn snapshot_serializes_as_json() {
    let credentials = store_with(true, false);
    let json = serde_json::to_string(&credentials.snapshot()).unwrap();
    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.user.unwrap().token, "user-token");
    assert_eq!(snapshot.role, Some(Role::User));
}
