// ============================================================================
// PORTAL PWA - FRONTEND RUST PURO
// ============================================================================
// - Views: funciones que renderizan DOM (shells mínimos por ruta)
// - State: stores reactivos con Rc<RefCell> + suscriptores
// - Services: handles de capacidad del backend (auth, documentos, ficheros)
// - Router: tabla estática de rutas + navigation guard sobre la sesión
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;

// Instancia única de App a nivel de proceso (necesidad del entry wasm)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging en consola
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Portal PWA - Rust puro");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-renderizar la app completa (vista de la ruta actual + capa de toast)
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(ref mut app) = *cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ rerender_app antes de inicializar la app");
        }
    });
}

/// Navegar a un path desde cualquier vista. La navegación es asíncrona:
/// pasa por el guard antes de entrar en la ruta.
pub fn navigate(path: &str) {
    APP.with(|cell| {
        if let Some(ref app) = *cell.borrow() {
            app.router().navigate(path);
        } else {
            log::warn!("⚠️ navigate('{}') antes de inicializar la app", path);
        }
    });
}
