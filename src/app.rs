// ============================================================================
// APP - Aplicación principal (composition root)
// ============================================================================
// Secuencia de arranque: cliente backend (fatal si falla) → stores →
// suscripción a auth → toast pendiente → router. Los stores viven aquí
// y se pasan por referencia; nada de singletons ambientales.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::router::Router;
use crate::services::BackendClient;
use crate::state::AppState;
use crate::views;

/// Aplicación principal
pub struct App {
    state: AppState,
    router: Router,
    root: Element,
}

impl App {
    /// Crear nueva aplicación. Un fallo construyendo el cliente backend
    /// aborta el arranque.
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let backend = BackendClient::init(&CONFIG.backend)
            .map_err(|e| JsValue::from_str(&format!("startup aborted: {}", e)))?;
        let state = AppState::new(backend);

        // Suscripción única al stream de auth del backend
        state.session.initialize();

        // Consumir el toast pendiente de la recarga anterior (una vez
        // por carga de página)
        if let Err(e) = state.notifications.check_pending_notification() {
            log::warn!("⚠️ Toast pendiente descartado: {}", e);
        }

        // Cambios de sesión → re-render completo, batcheado al siguiente tick
        state.session.subscribe(move || {
            Timeout::new(0, crate::rerender_app).forget();
        });

        // Cambios de toast → update incremental de la capa, sin re-render
        {
            let notifications = state.notifications.clone();
            state.notifications.subscribe(move || {
                if let Err(e) = views::update_toast(&notifications) {
                    log::warn!("⚠️ Error actualizando toast: {:?}", e);
                }
            });
        }

        let router = Router::new(state.clone());
        router.start();

        Ok(Self {
            state,
            router,
            root,
        })
    }

    /// Renderizar la vista de la ruta actual + capa de toast
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");

        let route = self.router.current_route();
        let view = (route.view)(&self.state)?;
        append_child(&self.root, &view)?;

        let toast_layer = views::render_toast_layer(&self.state.notifications)?;
        append_child(&self.root, &toast_layer)?;

        Ok(())
    }

    /// Obtener referencia al estado
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Obtener referencia al router
    pub fn router(&self) -> &Router {
        &self.router
    }
}
