use tracing::debug;

use crate::models::{Location, Navigation, ResolvedRoute, Session};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
/// Query parameter that carries the originally requested path to the login screen.
pub const REDIRECT_QUERY: &str = "redirect";

/// Decides whether `to` may be entered with the given session.
///
/// The authentication check runs first, so an anonymous visitor of an admin
/// route lands on the login screen rather than the home screen.
pub fn evaluate(to: &ResolvedRoute, session: &Session) -> Navigation {
    let requires_auth = to.requires_auth();
    let requires_admin = to.requires_admin();
    debug!(
        to = %to.full_path,
        authenticated = session.is_authenticated(),
        role = session.role(),
        requires_auth,
        requires_admin,
        "Guarding navigation"
    );

    if requires_auth && !session.is_authenticated() {
        debug!("Redirecting to login");
        return Navigation::Redirect(
            Location::path(LOGIN_PATH).with_query(REDIRECT_QUERY, &to.full_path),
        );
    }
    if requires_admin && !session.is_admin() {
        debug!("Redirecting home, admin required");
        return Navigation::Redirect(Location::path(HOME_PATH));
    }
    Navigation::Allow
}
