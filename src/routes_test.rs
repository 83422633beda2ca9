use super::*;

// =============================================================
// Descriptor lookup
// =============================================================

#[test]
fn finds_exact_paths() {
    let table = RouteTable::standard();
    assert_eq!(table.find(LOGIN).unwrap().path, LOGIN);
    assert_eq!(table.find("/dashboard/health-data").unwrap().path, "/dashboard/health-data");
    assert_eq!(table.find("/admin/users").unwrap().path, "/admin/users");
}

#[test]
fn finds_parameterized_article_route() {
    let table = RouteTable::standard();
    let descriptor = table.find("/dashboard/knowledge-center/article/42").unwrap();
    assert_eq!(descriptor.path, "/dashboard/knowledge-center/article/:id");
    assert!(descriptor.requires_auth);
}

#[test]
fn empty_param_segment_does_not_match() {
    let table = RouteTable::standard();
    assert!(table.find("/dashboard/knowledge-center/article/").is_none());
}

#[test]
fn unknown_path_has_no_descriptor() {
    let table = RouteTable::standard();
    assert!(table.find("/nowhere").is_none());
    assert!(table.find("/dashboard/health-data/extra").is_none());
}

// =============================================================
// Route metadata
// =============================================================

#[test]
fn dashboard_children_require_auth() {
    let table = RouteTable::standard();
    for path in [
        DASHBOARD,
        "/dashboard/health-data",
        "/dashboard/ai-chat",
        "/dashboard/ai-assistant",
        "/dashboard/knowledge-center",
        "/dashboard/profile",
    ] {
        let descriptor = table.find(path).unwrap();
        assert!(descriptor.requires_auth, "{path} should require auth");
        assert!(!descriptor.requires_admin, "{path} should not require admin");
    }
}

#[test]
fn only_admin_root_sets_requires_admin() {
    let table = RouteTable::standard();
    assert!(table.find(ADMIN_HOME).unwrap().requires_admin);
    for path in ["/admin/users", "/admin/health-data", "/admin/articles", "/admin/settings", "/admin/logs"] {
        let descriptor = table.find(path).unwrap();
        assert!(descriptor.requires_auth, "{path} should require auth");
        assert!(!descriptor.requires_admin, "{path} child leaves requires_admin unset");
    }
}

#[test]
fn entry_pages_are_open() {
    let table = RouteTable::standard();
    for path in [LOGIN, REGISTER, ADMIN_LOGIN] {
        let descriptor = table.find(path).unwrap();
        assert!(!descriptor.requires_auth);
        assert!(!descriptor.requires_admin);
    }
}

// =============================================================
// Admin area classification
// =============================================================

#[test]
fn admin_root_and_children_are_admin_area() {
    assert!(is_admin_area(ADMIN_HOME));
    assert!(is_admin_area("/admin/users"));
    assert!(is_admin_area("/admin/logs"));
}

#[test]
fn admin_login_is_not_admin_area() {
    assert!(!is_admin_area(ADMIN_LOGIN));
}

#[test]
fn user_paths_are_not_admin_area() {
    assert!(!is_admin_area(LOGIN));
    assert!(!is_admin_area(DASHBOARD));
    assert!(!is_admin_area("/dashboard/health-data"));
    // Prefix match is segment-aware: "/administration" is not "/admin".
    assert!(!is_admin_area("/administration"));
}
