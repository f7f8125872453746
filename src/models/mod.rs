mod error;
mod fleet;
mod route;
mod session;
mod token_claims;

pub use error::{AuthError, NavigationError, RouteError, StorageError, TokenError};
pub use fleet::{Amenities, Bus, BusStatus, Role, StaffUser, Trip, TripStatus};
pub(crate) use route::LOCATION_BASE;
pub use route::{Location, Navigation, ResolvedRoute, RouteDescriptor, RouteRecord, View};
pub use session::{Session, SessionState};
pub use token_claims::{CredentialToken, TokenClaims, UserId, UserProfile};

/// Role allowed through admin-only routes.
pub const ADMIN_ROLE: &str = Role::Admin.as_str();
