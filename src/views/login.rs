// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_submit, ElementBuilder};
use crate::router::DASHBOARD_PATH;
use crate::state::{AppState, ToastKind};
use crate::views::input_value;

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("auth-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Connexion").build();
    let subtitle = ElementBuilder::new("p")?
        .text("Accédez à votre espace membre")
        .build();
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;

    let form = ElementBuilder::new("form")?.class("auth-form").build();

    let email_group = form_group("login-email", "Email", "email", "votre@email.com")?;
    let password_group = form_group("login-password", "Mot de passe", "password", "••••••••")?;

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Se connecter")
        .build();

    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit)?;

    {
        let auth = state.backend.auth().clone();
        let notifications = state.notifications.clone();
        on_submit(&form, move |_| {
            let email = input_value("login-email");
            let password = input_value("login-password");

            if email.is_empty() || password.is_empty() {
                notifications.show_error("Veuillez remplir tous les champs");
                return;
            }

            let auth = auth.clone();
            let notifications = notifications.clone();
            spawn_local(async move {
                match auth.sign_in(&email, &password).await {
                    Ok(user) => {
                        // El redirect post-login es una recarga completa:
                        // el toast viaja por el slot pendiente
                        if let Err(e) = notifications
                            .set_pending_notification("Connexion réussie !", ToastKind::Success)
                        {
                            log::warn!("⚠️ No se pudo encolar el toast de login: {}", e);
                        }
                        log::info!("✅ Login: {}", user.email);
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(DASHBOARD_PATH);
                        }
                    }
                    Err(e) => {
                        log::error!("❌ Error en login: {}", e);
                        notifications.show_error(&format!("Échec de connexion : {}", e));
                    }
                }
            });
        })?;
    }

    let footer = ElementBuilder::new("div")?.class("auth-footer").build();
    let register_link = ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text("Pas encore de compte ? Inscrivez-vous")
        .build();
    on_click(&register_link, move |_| crate::navigate("/register"))?;
    append_child(&footer, &register_link)?;

    append_child(&container, &header)?;
    append_child(&container, &form)?;
    append_child(&container, &footer)?;
    append_child(&screen, &container)?;

    Ok(screen)
}

pub(crate) fn form_group(
    id: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label_el = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label)
        .build();

    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("required", "true")?
        .build();

    append_child(&group, &label_el)?;
    append_child(&group, &input)?;
    Ok(group)
}
