//! Tests de navegador (wasm-bindgen-test): comportamiento que depende de
//! sessionStorage, timers y red. Ejecutar con `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chrono::Utc;
use gloo_storage::{SessionStorage, Storage};
use gloo_timers::future::TimeoutFuture;

use portal_pwa::config::BackendConfig;
use portal_pwa::error::AppError;
use portal_pwa::models::{StoredAuthSession, UserIdentity};
use portal_pwa::services::AuthClient;
use portal_pwa::state::{NotificationStore, SessionStore, ToastKind};
use portal_pwa::utils::{remove_from_storage, save_to_storage, PENDING_TOAST_KEY, STORAGE_KEY_AUTH_SESSION};

wasm_bindgen_test_configure!(run_in_browser);

fn pending_slot_raw() -> Option<String> {
    SessionStorage::raw().get_item(PENDING_TOAST_KEY).ok().flatten()
}

#[wasm_bindgen_test]
fn pending_toast_roundtrip_empties_slot() {
    SessionStorage::delete(PENDING_TOAST_KEY);

    let store = NotificationStore::new();
    store
        .set_pending_notification("Bienvenue !", ToastKind::Success)
        .unwrap();
    assert!(pending_slot_raw().is_some());

    store.check_pending_notification().unwrap();

    let state = store.snapshot();
    assert!(state.visible);
    assert_eq!(state.message, "Bienvenue !");
    assert_eq!(state.kind, ToastKind::Success);
    assert!(pending_slot_raw().is_none(), "el slot queda vacío tras el check");

    // Segundo check: no-op
    store.hide_notification();
    store.check_pending_notification().unwrap();
    assert!(!store.snapshot().visible);
}

#[wasm_bindgen_test]
fn malformed_pending_toast_is_discarded_with_error() {
    SessionStorage::raw()
        .set_item(PENDING_TOAST_KEY, "{not valid json")
        .unwrap();

    let store = NotificationStore::new();
    let err = store.check_pending_notification().unwrap_err();
    assert!(matches!(err, AppError::Deserialization(_)));
    assert!(
        pending_slot_raw().is_none(),
        "la entrada corrupta se borra para no envenenar recargas"
    );
    assert!(!store.snapshot().visible);
}

#[wasm_bindgen_test]
async fn toast_auto_hides_after_duration() {
    let store = NotificationStore::new();
    store.show_notification("Enregistré", ToastKind::Success, 100);
    assert!(store.snapshot().visible);

    TimeoutFuture::new(200).await;
    assert!(!store.snapshot().visible, "el toast se oculta solo");
}

#[wasm_bindgen_test]
async fn overwriting_toast_cancels_stale_hide_timer() {
    let store = NotificationStore::new();
    store.show_notification("primero", ToastKind::Success, 100);
    // El segundo toast es persistente: el timer del primero no debe ocultarlo
    store.show_notification("segundo", ToastKind::Error, 0);

    TimeoutFuture::new(250).await;
    let state = store.snapshot();
    assert!(state.visible, "un timer viejo nunca oculta un toast más nuevo");
    assert_eq!(state.message, "segundo");
}

fn unroutable_config() -> BackendConfig {
    // Nada escucha en el puerto 9: toda petición falla rápido
    BackendConfig {
        auth_domain: "127.0.0.1:9".to_string(),
        ..BackendConfig::default()
    }
}

fn persisted_session(uid: &str) -> StoredAuthSession {
    StoredAuthSession {
        user: UserIdentity {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: None,
        },
        id_token: "stored-token".to_string(),
        refresh_token: None,
        persisted_at: Utc::now(),
    }
}

#[wasm_bindgen_test]
async fn first_transition_restores_persisted_session() {
    save_to_storage(STORAGE_KEY_AUTH_SESSION, &persisted_session("u-restore")).unwrap();

    let store = SessionStore::new(AuthClient::new(&unroutable_config()));
    assert!(store.is_loading());

    store.initialize();
    store.wait_for_auth().await;

    assert!(!store.is_loading());
    assert_eq!(store.current_user().unwrap().uid, "u-restore");

    remove_from_storage(STORAGE_KEY_AUTH_SESSION).unwrap();
}

#[wasm_bindgen_test]
async fn first_transition_without_persisted_session_is_no_user() {
    remove_from_storage(STORAGE_KEY_AUTH_SESSION).unwrap();

    let store = SessionStore::new(AuthClient::new(&unroutable_config()));
    store.initialize();
    store.wait_for_auth().await;

    assert!(!store.is_loading());
    assert!(!store.is_logged_in());
}

#[wasm_bindgen_test]
async fn failed_sign_out_leaves_session_intact() {
    save_to_storage(STORAGE_KEY_AUTH_SESSION, &persisted_session("u-logout")).unwrap();

    let store = SessionStore::new(AuthClient::new(&unroutable_config()));
    store.initialize();
    store.wait_for_auth().await;
    assert!(store.is_logged_in());

    // El backend es inalcanzable: el sign-out falla y el usuario queda
    let err = store.logout().await.unwrap_err();
    assert!(matches!(err, AppError::AuthOperation(_)));
    assert!(store.is_logged_in(), "sin limpieza parcial tras el fallo");

    remove_from_storage(STORAGE_KEY_AUTH_SESSION).unwrap();
}
