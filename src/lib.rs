//! Client-side core of the fleet administration console: the session store
//! that owns the login token, and the router whose guard keeps anonymous and
//! non-admin users out of the screens they may not see.

pub mod api;
pub mod core;
pub mod models;
pub mod system;
