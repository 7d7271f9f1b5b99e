// ============================================================================
// VIEWS - Shells de vista por ruta (DOM puro, sin framework)
// ============================================================================

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod profile;
pub mod register;
pub mod search;
pub mod toast;

pub use dashboard::render_dashboard;
pub use landing::render_landing;
pub use login::render_login;
pub use profile::render_profile;
pub use register::render_register;
pub use search::render_search;
pub use toast::{render_toast_layer, update_toast};

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlInputElement};

use crate::dom::{get_element_by_id, ElementBuilder, on_click};

/// Valor actual de un input por id (cadena vacía si no existe)
pub(crate) fn input_value(id: &str) -> String {
    get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Barra de navegación de las vistas autenticadas
pub(crate) fn render_nav(active: &str) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("app-nav").build();

    for (label, path) in [
        ("Tableau de bord", "/dashboard"),
        ("Recherche", "/search"),
        ("Profil", "/profile"),
    ] {
        let class = if path == active {
            "nav-link nav-link-active"
        } else {
            "nav-link"
        };
        let link = ElementBuilder::new("button")?
            .class(class)
            .attr("type", "button")?
            .text(label)
            .build();
        on_click(&link, move |_| crate::navigate(path))?;
        crate::dom::append_child(&nav, &link)?;
    }

    Ok(nav)
}
