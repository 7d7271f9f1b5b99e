use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_submit, ElementBuilder, get_element_by_id, set_text_content};
use crate::state::AppState;
use crate::views::{input_value, render_nav};

/// Vista de búsqueda (shell: el motor de búsqueda vive en el backend)
pub fn render_search(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("search-screen").build();

    let header = ElementBuilder::new("header")?.class("app-header").build();
    let title = ElementBuilder::new("h1")?.text("Recherche").build();
    append_child(&header, &title)?;
    append_child(&screen, &header)?;
    append_child(&screen, &render_nav("/search")?)?;

    let form = ElementBuilder::new("form")?.class("search-form").build();
    let input = ElementBuilder::new("input")?
        .id("search-query")?
        .attr("type", "search")?
        .attr("placeholder", "Rechercher...")?
        .build();
    let submit = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Rechercher")
        .build();
    append_child(&form, &input)?;
    append_child(&form, &submit)?;

    let results = ElementBuilder::new("p")?
        .id("search-results")?
        .class("search-results")
        .text("Saisissez une recherche pour commencer")
        .build();

    {
        let notifications = state.notifications.clone();
        on_submit(&form, move |_| {
            let query = input_value("search-query");
            if query.is_empty() {
                notifications.show_error("Saisissez un terme de recherche");
                return;
            }
            log::info!("🔍 Recherche: {}", query);
            if let Some(results) = get_element_by_id("search-results") {
                set_text_content(&results, &format!("Aucun résultat pour « {} »", query));
            }
        })?;
    }

    append_child(&screen, &form)?;
    append_child(&screen, &results)?;

    Ok(screen)
}
