use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Requests,
    GrantAccess,
    NotFound,
}

impl Route {
    /// Entries shown in the sidebar and the mobile drawer.
    pub const NAV: [Route; 3] = [Route::Dashboard, Route::Requests, Route::GrantAccess];

    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" | "/admin" | "/admin/dashboard" => Route::Dashboard,
            "/admin/requests" | "/admin/payment-requests" => Route::Requests,
            "/admin/grant-access" => Route::GrantAccess,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/admin/dashboard",
            Route::Requests => "/admin/requests",
            Route::GrantAccess => "/admin/grant-access",
            Route::NotFound => "/admin/404",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Requests => "Payment Requests",
            Route::GrantAccess => "Grant Access",
            Route::NotFound => "Not Found",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Route::Dashboard => "📊",
            Route::Requests => "💳",
            Route::GrantAccess => "🔑",
            Route::NotFound => "❓",
        }
    }

    pub fn current() -> Self {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .map(|p| Self::from_path(&p))
            .unwrap_or(Route::Dashboard)
    }

    /// Records the route in the address bar without reloading.
    pub fn push(self) {
        let pushed = web_sys::window()
            .and_then(|w| w.history().ok())
            .map(|h| h.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(self.path())));
        if !matches!(pushed, Some(Ok(()))) {
            log::warn!("could not push history state for {}", self.path());
        }
    }
}

/// Where a route change came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationSource {
    /// A click inside the app; the address bar still shows the old route.
    Link,
    /// Browser back/forward; the address bar already shows the new route.
    History,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Go { push: bool },
}

pub fn transition(current: Route, target: Route, source: NavigationSource) -> Transition {
    if current == target {
        return Transition::Stay;
    }
    Transition::Go {
        push: source == NavigationSource::Link,
    }
}

const POPSTATE: &str = "popstate";

/// Calls back with the current route on every browser back/forward.
/// The listener is removed when this value is dropped.
pub struct PopStateListener {
    window: Window,
    closure: Closure<dyn FnMut()>,
}

impl PopStateListener {
    pub fn register(on_change: impl Fn(Route) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut()>::new(move || on_change(Route::current()));
        if let Err(e) =
            window.add_event_listener_with_callback(POPSTATE, closure.as_ref().unchecked_ref())
        {
            log::warn!("could not listen for {}: {:?}", POPSTATE, e);
            return None;
        }
        Some(Self { window, closure })
    }
}

impl Drop for PopStateListener {
    fn drop(&mut self) {
        let removed = self
            .window
            .remove_event_listener_with_callback(POPSTATE, self.closure.as_ref().unchecked_ref());
        if let Err(e) = removed {
            log::warn!("could not remove {} listener: {:?}", POPSTATE, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path("/admin/"), Route::Dashboard);
        assert_eq!(Route::from_path("/admin/requests"), Route::Requests);
        assert_eq!(Route::from_path("/admin/grant-access/"), Route::GrantAccess);
        assert_eq!(Route::from_path("/admin/unknown"), Route::NotFound);
    }

    #[test]
    fn test_nav_paths_resolve_to_themselves() {
        for route in Route::NAV {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_link_navigation_pushes() {
        assert_eq!(
            transition(Route::Dashboard, Route::Requests, NavigationSource::Link),
            Transition::Go { push: true }
        );
    }

    #[test]
    fn test_history_navigation_follows_without_pushing() {
        assert_eq!(
            transition(Route::Requests, Route::Dashboard, NavigationSource::History),
            Transition::Go { push: false }
        );
        assert_eq!(
            transition(Route::Dashboard, Route::Dashboard, NavigationSource::History),
            Transition::Stay
        );
        assert_eq!(
            transition(Route::GrantAccess, Route::GrantAccess, NavigationSource::Link),
            Transition::Stay
        );
    }
}
