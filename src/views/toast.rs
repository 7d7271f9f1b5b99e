// ============================================================================
// TOAST LAYER - Reflejo DOM del NotificationStore
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{get_element_by_id, set_text_content, ElementBuilder};
use crate::state::{NotificationStore, ToastKind};

const TOAST_LAYER_ID: &str = "toast-layer";

fn kind_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast-success",
        ToastKind::Error => "toast-error",
    }
}

/// Crear la capa de toast (una por render de la app), ya sincronizada
/// con el estado actual del store
pub fn render_toast_layer(notifications: &NotificationStore) -> Result<Element, JsValue> {
    let layer = ElementBuilder::new("div")?.id(TOAST_LAYER_ID)?.build();
    apply_state(&layer, notifications);
    Ok(layer)
}

/// Update incremental: sincroniza la capa con el snapshot del store sin
/// re-renderizar la app
pub fn update_toast(notifications: &NotificationStore) -> Result<(), JsValue> {
    let layer = match get_element_by_id(TOAST_LAYER_ID) {
        Some(layer) => layer,
        // La capa aún no está montada (primer render en curso)
        None => return Ok(()),
    };

    apply_state(&layer, notifications);
    Ok(())
}

fn apply_state(layer: &Element, notifications: &NotificationStore) {
    let state = notifications.snapshot();
    if state.visible {
        layer.set_class_name(&format!("toast {}", kind_class(state.kind)));
        set_text_content(layer, &state.message);
    } else {
        layer.set_class_name("toast toast-hidden");
    }
}
