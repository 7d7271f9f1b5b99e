use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::router::LOGIN_PATH;
use crate::state::AppState;

/// Página de entrada para visitantes
pub fn render_landing(_state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("landing-screen").build();

    let hero = ElementBuilder::new("div")?.class("landing-hero").build();
    let title = ElementBuilder::new("h1")?.text("Portal").build();
    let subtitle = ElementBuilder::new("p")?
        .text("Votre espace membre, partout")
        .build();
    append_child(&hero, &title)?;
    append_child(&hero, &subtitle)?;

    let actions = ElementBuilder::new("div")?.class("landing-actions").build();

    let login_btn = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .text("Connexion")
        .build();
    on_click(&login_btn, move |_| crate::navigate(LOGIN_PATH))?;

    let register_btn = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .text("Créer un compte")
        .build();
    on_click(&register_btn, move |_| crate::navigate("/register"))?;

    append_child(&actions, &login_btn)?;
    append_child(&actions, &register_btn)?;
    append_child(&screen, &hero)?;
    append_child(&screen, &actions)?;

    Ok(screen)
}
