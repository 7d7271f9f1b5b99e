use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_text_content, ElementBuilder};
use crate::state::AppState;
use crate::views::render_nav;

/// Vista de perfil: identidad local + documento de perfil del backend
pub fn render_profile(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("profile-screen").build();

    let header = ElementBuilder::new("header")?.class("app-header").build();
    let title = ElementBuilder::new("h1")?.text("Profil").build();
    append_child(&header, &title)?;
    append_child(&screen, &header)?;
    append_child(&screen, &render_nav("/profile")?)?;

    let card = ElementBuilder::new("div")?.class("profile-card").build();

    let user = state.session.current_user();
    if let Some(user) = user {
        let avatar = ElementBuilder::new("img")?
            .class("profile-avatar")
            .attr(
                "src",
                &state
                    .backend
                    .storage()
                    .object_url(&format!("avatars/{}.png", user.uid)),
            )?
            .attr("alt", "avatar")?
            .build();

        let name = ElementBuilder::new("h2")?
            .text(user.display_name.as_deref().unwrap_or("Sans nom"))
            .build();
        let email = ElementBuilder::new("p")?
            .class("profile-email")
            .text(&user.email)
            .build();
        let bio = ElementBuilder::new("p")?
            .id("profile-bio")?
            .class("profile-bio")
            .text("Chargement du profil...")
            .build();

        append_child(&card, &avatar)?;
        append_child(&card, &name)?;
        append_child(&card, &email)?;
        append_child(&card, &bio)?;

        // El documento de perfil vive en la base de documentos del backend
        let database = state.backend.database().clone();
        spawn_local(async move {
            match database.get_document(&format!("users/{}", user.uid)).await {
                Ok(document) => {
                    let bio_text = document
                        .get("bio")
                        .and_then(|v| v.as_str())
                        .unwrap_or("Aucune bio renseignée")
                        .to_string();
                    if let Some(bio) = get_element_by_id("profile-bio") {
                        set_text_content(&bio, &bio_text);
                    }
                }
                Err(e) => {
                    log::warn!("⚠️ Documento de perfil no disponible: {}", e);
                    if let Some(bio) = get_element_by_id("profile-bio") {
                        set_text_content(&bio, "Profil indisponible pour le moment");
                    }
                }
            }
        });
    }

    append_child(&screen, &card)?;
    Ok(screen)
}
