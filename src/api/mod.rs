mod auth;
mod router;
mod routes;
mod session;
#[cfg(test)]
mod test_router;

pub use auth::{Authenticator, DemoAccount, MockAuthenticator, DEMO_ACCOUNTS, SESSION_TTL_HOURS};
pub use router::{RouteTable, Router, MAX_REDIRECTS};
pub use routes::default_routes;
pub use session::SessionStore;
