// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, on_submit, ElementBuilder};
use crate::router::{DASHBOARD_PATH, LOGIN_PATH};
use crate::state::{AppState, ToastKind};
use crate::views::login::form_group;
use crate::views::input_value;

/// Renderizar vista de registro
pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("auth-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Créer un compte").build();
    append_child(&header, &title)?;

    let form = ElementBuilder::new("form")?.class("auth-form").build();

    let name_group = form_group("register-name", "Nom affiché", "text", "Votre nom")?;
    let email_group = form_group("register-email", "Email", "email", "votre@email.com")?;
    let password_group = form_group("register-password", "Mot de passe", "password", "••••••••")?;

    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("S'inscrire")
        .build();

    append_child(&form, &name_group)?;
    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &submit)?;

    {
        let auth = state.backend.auth().clone();
        let notifications = state.notifications.clone();
        on_submit(&form, move |_| {
            let display_name = input_value("register-name");
            let email = input_value("register-email");
            let password = input_value("register-password");

            if email.is_empty() || password.is_empty() {
                notifications.show_error("Veuillez remplir tous les champs");
                return;
            }

            let display_name = if display_name.is_empty() {
                None
            } else {
                Some(display_name)
            };

            let auth = auth.clone();
            let notifications = notifications.clone();
            spawn_local(async move {
                match auth.sign_up(&email, &password, display_name).await {
                    Ok(user) => {
                        if let Err(e) = notifications.set_pending_notification(
                            "Compte créé, bienvenue !",
                            ToastKind::Success,
                        ) {
                            log::warn!("⚠️ No se pudo encolar el toast de registro: {}", e);
                        }
                        log::info!("✅ Registro: {}", user.email);
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(DASHBOARD_PATH);
                        }
                    }
                    Err(e) => {
                        log::error!("❌ Error en registro: {}", e);
                        notifications.show_error(&format!("Échec de l'inscription : {}", e));
                    }
                }
            });
        })?;
    }

    let footer = ElementBuilder::new("div")?.class("auth-footer").build();
    let login_link = ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text("Déjà un compte ? Connectez-vous")
        .build();
    on_click(&login_link, move |_| crate::navigate(LOGIN_PATH))?;
    append_child(&footer, &login_link)?;

    append_child(&container, &header)?;
    append_child(&container, &form)?;
    append_child(&container, &footer)?;
    append_child(&screen, &container)?;

    Ok(screen)
}
