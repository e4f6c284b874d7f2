//! Route table and access guard

/// Fixed route set of the shell
///
/// Every route except Login sits behind the auth gate. There is no
/// dynamic route generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Employee directory
    #[default]
    Home,
    Features,
    Pricing,
    Resources,
    Contact,
    Login,
}

impl Route {
    /// Navigation order of the top bar
    pub const NAV: [Route; 5] = [
        Route::Home,
        Route::Features,
        Route::Pricing,
        Route::Resources,
        Route::Contact,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Features => "/features",
            Route::Pricing => "/pricing",
            Route::Resources => "/resources",
            Route::Contact => "/contact",
            Route::Login => "/login",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Features => "Features",
            Route::Pricing => "Pricing",
            Route::Resources => "Resources",
            Route::Contact => "Contact",
            Route::Login => "Login",
        }
    }

    /// Whether the route requires an authenticated session
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Resolve a navigation request against the current auth state
///
/// Gated routes redirect anonymous visitors to Login; Login redirects
/// authenticated visitors back to Home.
pub fn resolve(requested: Route, authenticated: bool) -> Route {
    if !authenticated && requested.requires_auth() {
        return Route::Login;
    }
    if authenticated && requested == Route::Login {
        return Route::Home;
    }
    requested
}
