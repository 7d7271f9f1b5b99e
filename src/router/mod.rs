// ============================================================================
// ROUTER - Tabla de rutas + navigation guard
// ============================================================================
// Cada intento de navegación pasa por el guard: Pending (esperando la
// primera resolución de auth) → Decided (allow / redirect). Sin retries:
// un evento de navegación produce exactamente una decisión.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, PopStateEvent};

use crate::config::CONFIG;
use crate::state::AppState;
use crate::views;

/// Destinos de redirect del guard (fijos, no configurables por ruta)
pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    Public,
    RequiresAuth,
    RequiresGuest,
}

pub type ViewFn = fn(&AppState) -> Result<Element, JsValue>;

/// Definición estática de una ruta. La tabla se define una vez y es
/// inmutable.
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub policy: AccessPolicy,
    pub view: ViewFn,
}

pub static ROUTES: [Route; 6] = [
    Route {
        path: LANDING_PATH,
        name: "Landing",
        policy: AccessPolicy::RequiresGuest,
        view: views::render_landing,
    },
    Route {
        path: LOGIN_PATH,
        name: "Login",
        policy: AccessPolicy::RequiresGuest,
        view: views::render_login,
    },
    Route {
        path: "/register",
        name: "Register",
        policy: AccessPolicy::RequiresGuest,
        view: views::render_register,
    },
    Route {
        path: DASHBOARD_PATH,
        name: "Dashboard",
        policy: AccessPolicy::RequiresAuth,
        view: views::render_dashboard,
    },
    Route {
        path: "/search",
        name: "Search",
        policy: AccessPolicy::RequiresAuth,
        view: views::render_search,
    },
    Route {
        path: "/profile",
        name: "Profile",
        policy: AccessPolicy::RequiresAuth,
        view: views::render_profile,
    },
];

pub fn find_route(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.path == path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(&'static str),
}

/// Decisión de acceso para una ruta según presencia de usuario
pub fn decide_navigation(policy: AccessPolicy, has_user: bool) -> NavigationDecision {
    match policy {
        AccessPolicy::RequiresAuth if !has_user => NavigationDecision::Redirect(LOGIN_PATH),
        AccessPolicy::RequiresGuest if has_user => NavigationDecision::Redirect(DASHBOARD_PATH),
        _ => NavigationDecision::Allow,
    }
}

/// Resolver un path pedido hasta una ruta permitida. Los redirects
/// re-entran en la decisión; converge en ≤ 2 saltos por construcción de
/// la tabla (login es guest-only, dashboard es auth-required). Paths
/// desconocidos caen a la landing.
fn resolve_path(requested: &str, has_user: bool) -> &'static Route {
    let mut path = requested;
    loop {
        let route = match find_route(path) {
            Some(route) => route,
            None => {
                log::warn!("⚠️ [ROUTER] Ruta desconocida '{}', usando landing", path);
                path = LANDING_PATH;
                continue;
            }
        };
        match decide_navigation(route.policy, has_user) {
            NavigationDecision::Allow => return route,
            NavigationDecision::Redirect(target) => {
                log::info!("🔀 [GUARD] {} → {}", route.path, target);
                path = target;
            }
        }
    }
}

#[derive(Clone)]
pub struct Router {
    state: AppState,
    current: Rc<RefCell<&'static Route>>,
    listener_started: Rc<RefCell<bool>>,
}

impl Router {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            current: Rc::new(RefCell::new(&ROUTES[0])),
            listener_started: Rc::new(RefCell::new(false)),
        }
    }

    pub fn current_route(&self) -> &'static Route {
        *self.current.borrow()
    }

    /// Registrar el listener de popstate (una sola vez) y resolver la
    /// navegación inicial desde la URL actual.
    pub fn start(&self) {
        {
            let mut started = self.listener_started.borrow_mut();
            if *started {
                log::warn!("⚠️ Router::start ya fue llamado, ignorando llamada duplicada");
                return;
            }
            *started = true;
        }

        if let Some(window) = web_sys::window() {
            let router = self.clone();
            let closure = Closure::wrap(Box::new(move |_event: PopStateEvent| {
                let path = web_sys::window()
                    .and_then(|w| w.location().pathname().ok())
                    .unwrap_or_else(|| LANDING_PATH.to_string());
                log::info!("⬅️ [ROUTER] popstate: {}", path);
                // La URL ya cambió en el history, no se vuelve a pushear
                router.dispatch(path, false);
            }) as Box<dyn FnMut(PopStateEvent)>);

            if window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
                .is_ok()
            {
                // Listener global registrado una sola vez: forget() es seguro
                closure.forget();
            }
        }

        let initial = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| LANDING_PATH.to_string());
        self.dispatch(initial, false);
    }

    /// Navegar a un path (empuja una entrada al history si se permite)
    pub fn navigate(&self, path: &str) {
        self.dispatch(path.to_string(), true);
    }

    fn dispatch(&self, path: String, push: bool) {
        let router = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            router.resolve(path, push).await;
        });
    }

    async fn resolve(&self, requested: String, push: bool) {
        // Guard, paso 1: esperar la primera resolución de auth, acotado.
        // Si el backend nunca entrega el primer evento, el timeout evita
        // dejar la navegación colgada para siempre.
        let wait = Box::pin(self.state.session.wait_for_auth());
        let timeout = Box::pin(TimeoutFuture::new(CONFIG.auth_wait_timeout_ms));
        if let Either::Right(_) = future::select(wait, timeout).await {
            log::warn!(
                "⚠️ [GUARD] Auth sin resolver tras {} ms, decidiendo con el estado actual",
                CONFIG.auth_wait_timeout_ms
            );
        }

        // Pasos 2-5: decidir con la presencia de usuario observada
        let has_user = self.state.session.is_logged_in();
        let route = resolve_path(&requested, has_user);
        self.enter(route, push);
    }

    fn enter(&self, route: &'static Route, push: bool) {
        *self.current.borrow_mut() = route;

        if push {
            if let Some(window) = web_sys::window() {
                if let Ok(history) = window.history() {
                    let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route.path));
                }
            }
        }

        log::info!("🧭 [ROUTER] Entrando en {} ({})", route.name, route.path);
        crate::rerender_app();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes_always_allowed() {
        assert_eq!(
            decide_navigation(AccessPolicy::Public, false),
            NavigationDecision::Allow
        );
        assert_eq!(
            decide_navigation(AccessPolicy::Public, true),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn protected_route_without_user_redirects_to_login() {
        assert_eq!(
            decide_navigation(AccessPolicy::RequiresAuth, false),
            NavigationDecision::Redirect(LOGIN_PATH)
        );
        assert_eq!(
            decide_navigation(AccessPolicy::RequiresAuth, true),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn guest_route_with_user_redirects_to_dashboard() {
        assert_eq!(
            decide_navigation(AccessPolicy::RequiresGuest, true),
            NavigationDecision::Redirect(DASHBOARD_PATH)
        );
        assert_eq!(
            decide_navigation(AccessPolicy::RequiresGuest, false),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn route_table_matches_declared_surface() {
        for (path, policy) in [
            ("/", AccessPolicy::RequiresGuest),
            ("/login", AccessPolicy::RequiresGuest),
            ("/register", AccessPolicy::RequiresGuest),
            ("/dashboard", AccessPolicy::RequiresAuth),
            ("/search", AccessPolicy::RequiresAuth),
            ("/profile", AccessPolicy::RequiresAuth),
        ] {
            let route = find_route(path).unwrap_or_else(|| panic!("missing route {}", path));
            assert_eq!(route.policy, policy, "policy mismatch for {}", path);
        }
        assert!(find_route("/nope").is_none());
    }

    #[test]
    fn resolve_path_converges_after_redirects() {
        // Sin usuario: ruta protegida termina en login, nunca en el target
        let route = resolve_path("/dashboard", false);
        assert_eq!(route.path, LOGIN_PATH);

        let route = resolve_path("/profile", false);
        assert_eq!(route.path, LOGIN_PATH);

        // Con usuario: ruta guest-only termina en dashboard
        let route = resolve_path("/login", true);
        assert_eq!(route.path, DASHBOARD_PATH);

        let route = resolve_path("/", true);
        assert_eq!(route.path, DASHBOARD_PATH);

        // Casos permitidos pasan sin modificar
        assert_eq!(resolve_path("/search", true).path, "/search");
        assert_eq!(resolve_path("/register", false).path, "/register");
    }

    #[test]
    fn unknown_path_falls_back_to_landing() {
        assert_eq!(resolve_path("/does-not-exist", false).path, LANDING_PATH);
        // Con usuario la landing es guest-only: el fallback re-entra al
        // guard y termina en dashboard
        assert_eq!(resolve_path("/does-not-exist", true).path, DASHBOARD_PATH);
    }
}
