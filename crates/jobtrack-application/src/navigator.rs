//! Navigation seam.
//!
//! The stores decide *when* the user moves between the authenticated and
//! unauthenticated areas; how that happens belongs to the front end.

/// Areas of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Performs navigation on behalf of the stores.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
