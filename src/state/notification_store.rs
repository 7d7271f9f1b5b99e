// ============================================================================
// NOTIFICATION STORE - Toasts transitorios + slot pendiente entre recargas
// ============================================================================
// Como mucho un toast visible a la vez (last write wins). El slot
// pendiente vive en sessionStorage (scope de pestaña) y se consume
// exactamente una vez por carga de página.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_storage::errors::StorageError;
use gloo_storage::{SessionStorage, Storage};
use gloo_timers::callback::Timeout;
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::AppError;
use crate::utils::PENDING_TOAST_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
    pub kind: ToastKind,
    pub duration_ms: i32,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            kind: ToastKind::Success,
            duration_ms: CONFIG.toast_duration_ms,
        }
    }
}

/// Toast serializado en sessionStorage para mostrarse tras la próxima
/// recarga de página (redirects de login/register)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingToast {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

#[derive(Clone, Default)]
pub struct NotificationStore {
    state: Rc<RefCell<ToastState>>,
    hide_timer: Rc<RefCell<Option<Timeout>>>,
    subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mostrar un toast, pisando el actual. El timer de auto-hide
    /// anterior se cancela SIEMPRE: un timer viejo nunca puede ocultar
    /// un toast más nuevo. Con duration_ms <= 0 el toast queda visible
    /// hasta hide_notification().
    pub fn show_notification(&self, message: &str, kind: ToastKind, duration_ms: i32) {
        if let Some(timer) = self.hide_timer.borrow_mut().take() {
            timer.cancel();
        }

        {
            let mut state = self.state.borrow_mut();
            state.message = message.to_string();
            state.kind = kind;
            state.duration_ms = duration_ms;
            state.visible = true;
        }
        self.notify();

        if duration_ms > 0 {
            let store = self.clone();
            let timer = Timeout::new(duration_ms as u32, move || {
                // No tocar hide_timer desde su propio callback
                store.apply_hide();
            });
            *self.hide_timer.borrow_mut() = Some(timer);
        }
    }

    /// Toast de éxito con la duración por defecto
    pub fn show_success(&self, message: &str) {
        self.show_notification(message, ToastKind::Success, CONFIG.toast_duration_ms);
    }

    /// Toast de error con la duración por defecto
    pub fn show_error(&self, message: &str) {
        self.show_notification(message, ToastKind::Error, CONFIG.toast_duration_ms);
    }

    /// Ocultar el toast actual. Idempotente.
    pub fn hide_notification(&self) {
        if let Some(timer) = self.hide_timer.borrow_mut().take() {
            timer.cancel();
        }
        self.apply_hide();
    }

    /// Encolar un toast para después de la próxima recarga de página.
    /// Pisa cualquier entrada pendiente anterior.
    pub fn set_pending_notification(&self, message: &str, kind: ToastKind) -> Result<(), AppError> {
        let pending = PendingToast {
            message: message.to_string(),
            kind,
        };
        SessionStorage::set(PENDING_TOAST_KEY, &pending)
            .map_err(|e| AppError::Storage(format!("pending toast write: {}", e)))
    }

    /// Consumir el slot pendiente: si hay entrada válida se muestra con
    /// la duración por defecto y se borra la clave. Payload malformado
    /// borra la clave y falla con Deserialization. Llamar una vez por
    /// carga de página (responsabilidad del host).
    pub fn check_pending_notification(&self) -> Result<(), AppError> {
        match SessionStorage::get::<PendingToast>(PENDING_TOAST_KEY) {
            Ok(pending) => {
                SessionStorage::delete(PENDING_TOAST_KEY);
                self.show_notification(&pending.message, pending.kind, CONFIG.toast_duration_ms);
                Ok(())
            }
            Err(StorageError::KeyNotFound(_)) => Ok(()),
            Err(StorageError::SerdeError(e)) => {
                // Borrar la entrada corrupta para no envenenar recargas futuras
                SessionStorage::delete(PENDING_TOAST_KEY);
                Err(AppError::Deserialization(format!(
                    "pending toast payload: {}",
                    e
                )))
            }
            Err(other) => Err(AppError::Storage(format!("pending toast read: {:?}", other))),
        }
    }

    /// Snapshot del estado actual del toast
    pub fn snapshot(&self) -> ToastState {
        self.state.borrow().clone()
    }

    /// Suscribirse a cambios del toast (update incremental de la capa UI)
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    fn apply_hide(&self) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let was_visible = state.visible;
            state.visible = false;
            was_visible
        };
        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Los tests nativos usan duration <= 0 para no tocar el timer del
    // navegador; el auto-hide real se cubre en tests/web.rs.

    #[test]
    fn show_overwrites_previous_toast() {
        let store = NotificationStore::new();
        store.show_notification("primero", ToastKind::Error, 0);
        store.show_notification("segundo", ToastKind::Success, 0);

        let state = store.snapshot();
        assert!(state.visible);
        assert_eq!(state.message, "segundo");
        assert_eq!(state.kind, ToastKind::Success);
    }

    #[test]
    fn non_positive_duration_keeps_toast_visible() {
        let store = NotificationStore::new();
        store.show_notification("fijo", ToastKind::Success, 0);
        assert!(store.snapshot().visible);

        store.hide_notification();
        assert!(!store.snapshot().visible);
    }

    #[test]
    fn hide_is_idempotent_and_notifies_once() {
        let store = NotificationStore::new();
        let notified = Rc::new(Cell::new(0u32));
        {
            let notified = notified.clone();
            store.subscribe(move || notified.set(notified.get() + 1));
        }

        store.show_notification("hola", ToastKind::Success, 0);
        assert_eq!(notified.get(), 1);

        store.hide_notification();
        assert_eq!(notified.get(), 2);

        // Segundo hide: sin cambio de estado, sin notificación
        store.hide_notification();
        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn pending_toast_wire_layout_matches_storage_schema() {
        let pending = PendingToast {
            message: "Bienvenue !".to_string(),
            kind: ToastKind::Success,
        };
        let json = serde_json::to_string(&pending).unwrap();
        assert_eq!(json, r#"{"message":"Bienvenue !","type":"success"}"#);

        let parsed: PendingToast = serde_json::from_str(r#"{"message":"x","type":"error"}"#).unwrap();
        assert_eq!(parsed.kind, ToastKind::Error);
    }

    #[test]
    fn malformed_pending_payload_fails_to_parse() {
        assert!(serde_json::from_str::<PendingToast>(r#"{"message":"x","type":"warning"}"#).is_err());
        assert!(serde_json::from_str::<PendingToast>(r#"{"msg":"x"}"#).is_err());
    }
}
