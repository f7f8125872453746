use std::sync::Arc;

use super::auth::MockAuthenticator;
use super::router::{RouteTable, Router};
use super::routes::default_routes;
use super::session::SessionStore;
use crate::core::guard::{HOME_PATH, LOGIN_PATH, REDIRECT_QUERY};
use crate::models::{Location, Navigation, NavigationError, RouteRecord, View};
use crate::system::{ApiClient, CredentialHeader, ManualClock, MemoryStore, SystemClock};
use chrono::{Duration, TimeZone, Utc};

fn session_store() -> Arc<SessionStore> {
    let clock = Arc::new(SystemClock);
    Arc::new(SessionStore::new(
        Arc::new(MemoryStore::new()),
        Arc::new(ApiClient::new("http://localhost:3000/api/v1").unwrap()),
        Arc::new(MockAuthenticator::new(clock.clone()).unwrap()),
        clock,
    ))
}

fn router() -> (Arc<SessionStore>, Router) {
    let session = session_store();
    let table = RouteTable::new(&default_routes()).unwrap();
    (session.clone(), Router::new(table, session))
}

#[test]
fn static_routes_win_over_params_declared_later() {
    let table = RouteTable::new(&default_routes()).unwrap();

    let new_trip = table.resolve("/trips/new").unwrap();
    assert_eq!(new_trip.name(), Some("NewTrip"));
    assert!(new_trip.params.is_empty());

    let edit_trip = table.resolve("/trips/12").unwrap();
    assert_eq!(edit_trip.name(), Some("EditTrip"));
    assert_eq!(edit_trip.params["id"], "12");
}

#[test]
fn unknown_paths_fall_through_to_public_not_found() {
    let table = RouteTable::new(&default_routes()).unwrap();
    let route = table.resolve("/no/such/page").unwrap();
    assert_eq!(route.leaf().map(|r| r.view), Some(View::NotFound));
    assert_eq!(route.params["pathMatch"], "no/such/page");
    assert!(!route.requires_auth());
}

#[test]
fn query_is_decoded_and_kept_in_full_path() {
    let table = RouteTable::new(&default_routes()).unwrap();
    let route = table.resolve("/login?redirect=%2Fusers%2F3").unwrap();
    assert_eq!(route.path, "/login");
    assert_eq!(route.query[REDIRECT_QUERY], "/users/3");
    assert_eq!(route.full_path, "/login?redirect=%2Fusers%2F3");
}

#[test]
fn nested_records_aggregate_flags() {
    let records = vec![RouteRecord::new("/admin", "Admin", View::Dashboard)
        .requires_admin()
        .with_children(vec![
            RouteRecord::new("audit", "Audit", View::Users),
            RouteRecord::new(":id", "AuditEntry", View::UserForm),
        ])];
    let table = RouteTable::new(&records).unwrap();

    let route = table.resolve("/admin/audit").unwrap();
    assert_eq!(route.matched.len(), 2);
    assert_eq!(route.matched[1].path, "/admin/audit");
    assert!(!route.matched[1].requires_admin);
    assert!(route.requires_admin());
    assert!(route.requires_auth());

    let entry = table.resolve("/admin/42").unwrap();
    assert_eq!(entry.name(), Some("AuditEntry"));
    assert_eq!(entry.params["id"], "42");
}

#[test]
fn malformed_patterns_are_rejected_up_front() {
    let records = vec![RouteRecord::new("/trips/:", "Broken", View::Trips)];
    assert!(RouteTable::new(&records).is_err());
}

#[test]
fn anonymous_user_lands_on_login_with_redirect() {
    let (_, router) = router();
    let landed = router.push("/users").unwrap();
    assert_eq!(landed.path, LOGIN_PATH);
    assert_eq!(landed.name(), Some("Login"));
    assert_eq!(landed.query[REDIRECT_QUERY], "/users");
    assert_eq!(router.current(), Some(landed));
}

#[test]
fn login_route_never_redirects_to_itself() {
    let (_, router) = router();
    let landed = router.push("/login").unwrap();
    assert_eq!(landed.full_path, "/login");
}

#[tokio::test]
async fn operator_is_sent_home_from_admin_routes() {
    let (session, router) = router();
    session.login("operator1", "operator1").await.unwrap();

    let landed = router.push("/users/3").unwrap();
    assert_eq!(landed.path, HOME_PATH);
    assert_eq!(landed.name(), Some("Dashboard"));

    let trips = router.push("/trips").unwrap();
    assert_eq!(trips.name(), Some("Trips"));
}

#[tokio::test]
async fn admin_reaches_admin_routes() {
    let (session, router) = router();
    session.login("admin", "admin").await.unwrap();
    let landed = router.push("/users/3").unwrap();
    assert_eq!(landed.name(), Some("EditUser"));
    assert_eq!(landed.params["id"], "3");
}

#[tokio::test]
async fn logout_locks_guarded_routes_again() {
    let (session, router) = router();
    session.login("admin", "admin").await.unwrap();
    assert_eq!(router.check("/buses").unwrap(), Navigation::Allow);

    session.logout();
    assert_eq!(
        router.check("/buses").unwrap(),
        Navigation::Redirect(Location::path(LOGIN_PATH).with_query(REDIRECT_QUERY, "/buses"))
    );
}

#[test]
fn check_does_not_move_the_router() {
    let (_, router) = router();
    router.check("/departures").unwrap();
    assert_eq!(router.current(), None);
}

#[test]
fn guarded_login_route_is_reported_as_a_loop() {
    let records = vec![
        RouteRecord::new("/login", "Login", View::Login).requires_auth(),
        RouteRecord::new("/", "Dashboard", View::Dashboard).requires_auth(),
    ];
    let router = Router::new(RouteTable::new(&records).unwrap(), session_store());
    assert_eq!(
        router.push("/"),
        Err(NavigationError::RedirectLoop("/".to_string()))
    );
}

#[test]
fn unmatched_location_without_catch_all() {
    let records = vec![RouteRecord::new("/login", "Login", View::Login)];
    let router = Router::new(RouteTable::new(&records).unwrap(), session_store());
    assert_eq!(
        router.push("/buses"),
        Err(NavigationError::NoMatch("/buses".to_string()))
    );
}

#[test]
fn locations_outside_the_console_are_rejected() {
    let table = RouteTable::new(&default_routes()).unwrap();
    for location in ["//other.host/users", "http://other.host/users", "users", "/\\other.host/x", ""] {
        assert_eq!(
            table.resolve(location),
            Err(NavigationError::InvalidLocation(location.to_string())),
            "accepted {location:?}"
        );
    }
}

#[tokio::test]
async fn navigation_notices_a_session_that_expired_in_place() {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
    ));
    let api = Arc::new(ApiClient::new("http://localhost:3000/api/v1").unwrap());
    let session = Arc::new(SessionStore::new(
        Arc::new(MemoryStore::new()),
        api.clone(),
        Arc::new(MockAuthenticator::new(clock.clone()).unwrap()),
        clock.clone(),
    ));
    let router = Router::new(RouteTable::new(&default_routes()).unwrap(), session.clone());
    session.login("admin", "admin").await.unwrap();
    assert_eq!(router.push("/users").unwrap().name(), Some("Users"));

    clock.advance(Duration::hours(24));
    let landed = router.push("/users").unwrap();

    assert_eq!(landed.path, LOGIN_PATH);
    assert_eq!(landed.query[REDIRECT_QUERY], "/users");
    assert!(!session.is_authenticated());
    assert_eq!(api.bearer(), None);
}
