use crate::models::{RouteRecord, View};

/// Screens of the fleet console. The login screen stays public so the guard
/// never bounces it back onto itself.
pub fn default_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("/login", "Login", View::Login),
        RouteRecord::new("/", "Dashboard", View::Dashboard).requires_auth(),
        RouteRecord::new("/trips", "Trips", View::Trips).requires_auth(),
        RouteRecord::new("/trips/new", "NewTrip", View::TripForm).requires_auth(),
        RouteRecord::new("/trips/:id", "EditTrip", View::TripForm).requires_auth(),
        RouteRecord::new("/buses", "Buses", View::Buses).requires_auth(),
        RouteRecord::new("/buses/new", "NewBus", View::BusForm).requires_auth(),
        RouteRecord::new("/buses/:id", "EditBus", View::BusForm).requires_auth(),
        RouteRecord::new("/departures", "Departures", View::Departures).requires_auth(),
        RouteRecord::new("/users", "Users", View::Users).requires_admin(),
        RouteRecord::new("/users/new", "NewUser", View::UserForm).requires_admin(),
        RouteRecord::new("/users/:id", "EditUser", View::UserForm).requires_admin(),
        RouteRecord::new("/:pathMatch(.*)*", "NotFound", View::NotFound),
    ]
}
