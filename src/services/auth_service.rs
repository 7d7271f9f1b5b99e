// ============================================================================
// AUTH SERVICE - Cliente de autenticación del backend
// ============================================================================
// Mantiene la identidad actual, la persiste entre recargas y entrega
// transiciones de estado de auth a los suscriptores. La primera
// determinación (restaurar sesión persistida o "sin usuario") se entrega
// de forma asíncrona tras la primera suscripción.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::config::BackendConfig;
use crate::error::AppError;
use crate::models::{
    AuthResponse, CredentialsRequest, SignOutRequest, StoredAuthSession, UserIdentity,
};
use crate::utils::{
    load_from_storage, remove_from_storage, save_to_storage, AUTH_SESSION_TTL_HOURS,
    STORAGE_KEY_AUTH_SESSION,
};

type AuthCallback = Rc<dyn Fn(Option<UserIdentity>)>;

struct AuthInner {
    current: Option<UserIdentity>,
    id_token: Option<String>,
    // true una vez entregada la primera determinación
    resolved: bool,
    restore_started: bool,
    next_subscriber_id: u64,
    subscribers: Vec<(u64, AuthCallback)>,
}

/// Handle devuelto por subscribe_auth_state; se pasa a unsubscribe
pub struct AuthSubscription {
    id: u64,
}

#[derive(Clone)]
pub struct AuthClient {
    config: BackendConfig,
    inner: Rc<RefCell<AuthInner>>,
}

impl AuthClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            config: config.clone(),
            inner: Rc::new(RefCell::new(AuthInner {
                current: None,
                id_token: None,
                resolved: false,
                restore_started: false,
                next_subscriber_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Suscribirse a transiciones de estado de auth. El callback se
    /// invoca en cada transición, siempre de forma diferida: la primera
    /// suscripción dispara la determinación inicial (restauración de la
    /// sesión persistida), y un suscriptor tardío recibe el estado
    /// actual en el siguiente tick.
    pub fn subscribe_auth_state<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(Option<UserIdentity>) + 'static,
    {
        let (id, already_resolved, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber_id;
            inner.next_subscriber_id += 1;
            inner.subscribers.push((id, Rc::new(callback)));
            (id, inner.resolved, inner.current.clone())
        };

        if already_resolved {
            let client = self.clone();
            Timeout::new(0, move || client.deliver_to(id, snapshot)).forget();
        } else {
            self.ensure_restore_started();
        }

        AuthSubscription { id }
    }

    /// Dar de baja una suscripción
    pub fn unsubscribe(&self, subscription: AuthSubscription) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(id, _)| *id != subscription.id);
    }

    /// Identidad actual (None si no hay usuario o aún no se resolvió)
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.inner.borrow().current.clone()
    }

    /// Sign-in con email y contraseña. En éxito persiste la sesión y
    /// notifica la transición a todos los suscriptores.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, AppError> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.config.auth_base_url(),
            self.config.api_key
        );
        let body = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
            return_secure_token: true,
        };
        self.authenticate(&url, &body).await
    }

    /// Alta de cuenta. Mismas post-condiciones que sign_in.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserIdentity, AppError> {
        let url = format!(
            "{}/accounts:signUp?key={}",
            self.config.auth_base_url(),
            self.config.api_key
        );
        let body = CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name,
            return_secure_token: true,
        };
        self.authenticate(&url, &body).await
    }

    /// Sign-out contra el backend. Si la llamada falla NO se toca el
    /// estado local: el error se propaga al caller. Sin token activo la
    /// operación es solo limpieza local.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        let token = self.inner.borrow().id_token.clone();

        if let Some(id_token) = token {
            let url = format!(
                "{}/accounts:signOut?key={}",
                self.config.auth_base_url(),
                self.config.api_key
            );
            let response = Request::post(&url)
                .json(&SignOutRequest { id_token })
                .map_err(|e| AppError::AuthOperation(format!("request build error: {}", e)))?
                .send()
                .await
                .map_err(|e| AppError::AuthOperation(format!("request error: {}", e)))?;

            if !response.ok() {
                return Err(AppError::AuthOperation(format!(
                    "sign-out HTTP {}",
                    response.status()
                )));
            }
        } else {
            log::info!("ℹ️ Sign-out sin token activo, limpieza local solamente");
        }

        if let Err(e) = remove_from_storage(STORAGE_KEY_AUTH_SESSION) {
            log::warn!("⚠️ No se pudo limpiar la sesión persistida: {}", e);
        }
        self.inner.borrow_mut().id_token = None;
        self.apply_auth_change(None);
        log::info!("👋 Sign-out completado");
        Ok(())
    }

    async fn authenticate(
        &self,
        url: &str,
        body: &CredentialsRequest,
    ) -> Result<UserIdentity, AppError> {
        let response = Request::post(url)
            .json(body)
            .map_err(|e| AppError::AuthOperation(format!("request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| AppError::AuthOperation(format!("request error: {}", e)))?;

        if !response.ok() {
            return Err(AppError::AuthOperation(format!(
                "auth HTTP {}",
                response.status()
            )));
        }

        let auth: AuthResponse = response
            .json()
            .await
            .map_err(|e| AppError::AuthOperation(format!("parse error: {}", e)))?;

        let id_token = auth.id_token.clone();
        let refresh_token = auth.refresh_token.clone();
        let user = auth.into_identity();

        // La sesión se persiste con timestamp para poder descartarla al
        // restaurar si quedó demasiado vieja
        let stored = StoredAuthSession {
            user: user.clone(),
            id_token: id_token.clone(),
            refresh_token,
            persisted_at: Utc::now(),
        };
        if let Err(e) = save_to_storage(STORAGE_KEY_AUTH_SESSION, &stored) {
            log::warn!("⚠️ No se pudo persistir la sesión: {}", e);
        }

        self.inner.borrow_mut().id_token = Some(id_token);
        self.apply_auth_change(Some(user.clone()));
        log::info!("✅ Autenticación exitosa: {}", user.email);
        Ok(user)
    }

    fn ensure_restore_started(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.restore_started {
                return;
            }
            inner.restore_started = true;
        }

        let client = self.clone();
        spawn_local(async move {
            let restored = client.restore_persisted_session();
            match &restored {
                Some(user) => log::info!("💾 Sesión restaurada desde storage: {}", user.email),
                None => log::info!("ℹ️ Sin sesión persistida, arrancando sin usuario"),
            }
            client.apply_auth_change(restored);
        });
    }

    fn restore_persisted_session(&self) -> Option<UserIdentity> {
        let stored: StoredAuthSession = load_from_storage(STORAGE_KEY_AUTH_SESSION)?;

        let age_hours = Utc::now()
            .signed_duration_since(stored.persisted_at)
            .num_hours();
        if age_hours >= AUTH_SESSION_TTL_HOURS {
            log::info!("🗑️ Sesión persistida expirada ({} h), descartando", age_hours);
            let _ = remove_from_storage(STORAGE_KEY_AUTH_SESSION);
            return None;
        }

        self.inner.borrow_mut().id_token = Some(stored.id_token);
        Some(stored.user)
    }

    fn deliver_to(&self, id: u64, user: Option<UserIdentity>) {
        let callback = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .find(|(sub_id, _)| *sub_id == id)
            .map(|(_, cb)| cb.clone());
        if let Some(callback) = callback {
            callback(user);
        }
    }

    fn apply_auth_change(&self, user: Option<UserIdentity>) {
        // Clonar la lista fuera del borrow: un callback puede volver a
        // entrar en el cliente (p.ej. leyendo current_user)
        let subscribers: Vec<AuthCallback> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = user.clone();
            inner.resolved = true;
            inner.subscribers.iter().map(|(_, cb)| cb.clone()).collect()
        };
        for callback in subscribers {
            callback(user.clone());
        }
    }
}
