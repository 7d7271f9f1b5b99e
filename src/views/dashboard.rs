// ============================================================================
// DASHBOARD VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::router::LANDING_PATH;
use crate::state::AppState;
use crate::views::render_nav;

/// Renderizar el tableau de bord del usuario autenticado
pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("dashboard-screen").build();

    let header = ElementBuilder::new("header")?.class("app-header").build();
    let title = ElementBuilder::new("h1")?.text("Tableau de bord").build();
    append_child(&header, &title)?;

    // El guard garantiza usuario presente en esta vista
    let greeting = match state.session.current_user() {
        Some(user) => {
            let name = user.display_name.unwrap_or(user.email);
            format!("Bonjour, {}", name)
        }
        None => "Bonjour".to_string(),
    };
    let welcome = ElementBuilder::new("p")?
        .class("dashboard-greeting")
        .text(&greeting)
        .build();

    let logout_btn = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .text("Se déconnecter")
        .build();

    {
        let session = state.session.clone();
        let notifications = state.notifications.clone();
        on_click(&logout_btn, move |_| {
            let session = session.clone();
            let notifications = notifications.clone();
            spawn_local(async move {
                match session.logout().await {
                    Ok(()) => {
                        notifications.show_success("Vous êtes déconnecté");
                        crate::navigate(LANDING_PATH);
                    }
                    Err(e) => {
                        // La sesión local queda intacta: solo se avisa
                        log::error!("❌ Error en sign-out: {}", e);
                        notifications.show_error(&format!("Échec de la déconnexion : {}", e));
                    }
                }
            });
        })?;
    }

    append_child(&header, &logout_btn)?;
    append_child(&screen, &header)?;
    append_child(&screen, &render_nav("/dashboard")?)?;
    append_child(&screen, &welcome)?;

    Ok(screen)
}
