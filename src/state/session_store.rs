// ============================================================================
// SESSION STORE - Estado de sesión de autenticación
// ============================================================================
// Dueño del usuario actual y de la señal de readiness de auth. Se
// suscribe una sola vez al stream de transiciones del backend; cada
// transición fija el usuario, baja loading (monótono: nunca vuelve a
// true) y abre el gate de readiness.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AppError;
use crate::models::UserIdentity;
use crate::services::{AuthClient, AuthSubscription};
use crate::state::ReadyGate;

#[derive(Clone)]
pub struct SessionStore {
    auth: AuthClient,
    current_user: Rc<RefCell<Option<UserIdentity>>>,
    loading: Rc<RefCell<bool>>,
    ready: ReadyGate,
    subscription: Rc<RefCell<Option<AuthSubscription>>>,
    subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl SessionStore {
    pub fn new(auth: AuthClient) -> Self {
        Self {
            auth,
            current_user: Rc::new(RefCell::new(None)),
            loading: Rc::new(RefCell::new(true)),
            ready: ReadyGate::new(),
            subscription: Rc::new(RefCell::new(None)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse (una sola vez) al stream de transiciones de auth.
    /// Llamadas duplicadas se ignoran.
    pub fn initialize(&self) {
        if self.subscription.borrow().is_some() {
            log::warn!("⚠️ SessionStore::initialize ya fue llamado, ignorando");
            return;
        }

        let store = self.clone();
        let subscription = self
            .auth
            .subscribe_auth_state(move |user| store.on_auth_event(user));
        *self.subscription.borrow_mut() = Some(subscription);
    }

    /// Transición de estado de auth entregada por el backend. La primera
    /// abre el gate de readiness; el gate garantiza resolución única,
    /// así que las siguientes solo actualizan el usuario.
    pub(crate) fn on_auth_event(&self, user: Option<UserIdentity>) {
        *self.current_user.borrow_mut() = user;
        *self.loading.borrow_mut() = false;
        self.ready.open();
        self.notify();
    }

    /// Esperar la primera resolución de auth. Si ya ocurrió, retorna sin
    /// suspender; si no, el caller se suspende en el gate junto con
    /// cualquier otro caller concurrente.
    pub async fn wait_for_auth(&self) {
        if !self.is_loading() {
            return;
        }
        self.ready.wait().await;
    }

    /// Sign-out. Si el backend falla, el estado local queda intacto y el
    /// error se propaga; el usuario se limpia solo tras el éxito.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.auth.sign_out().await?;
        *self.current_user.borrow_mut() = None;
        self.notify();
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.current_user.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.borrow().is_some()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Suscribirse a cambios del store (re-render de la app)
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
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
    use crate::config::BackendConfig;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn test_store() -> SessionStore {
        SessionStore::new(AuthClient::new(&BackendConfig::default()))
    }

    fn identity(uid: &str) -> UserIdentity {
        UserIdentity {
            uid: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: None,
        }
    }

    #[test]
    fn loading_clears_after_first_transition_and_stays_false() {
        let store = test_store();
        assert!(store.is_loading());

        store.on_auth_event(Some(identity("u1")));
        assert!(!store.is_loading());
        assert!(store.is_logged_in());

        // Transiciones posteriores actualizan el usuario sin tocar loading
        store.on_auth_event(None);
        assert!(!store.is_loading());
        assert!(!store.is_logged_in());

        store.on_auth_event(Some(identity("u2")));
        assert!(!store.is_loading());
        assert_eq!(store.current_user().unwrap().uid, "u2");
    }

    #[test]
    fn wait_for_auth_suspends_until_first_transition() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let store = test_store();
        let resumed = Rc::new(Cell::new(0u32));

        // Varios callers concurrentes antes de la primera transición
        for _ in 0..2 {
            let store = store.clone();
            let resumed = resumed.clone();
            spawner
                .spawn_local(async move {
                    store.wait_for_auth().await;
                    resumed.set(resumed.get() + 1);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(resumed.get(), 0, "nadie avanza antes de la transición");

        store.on_auth_event(None);
        pool.run_until_stalled();
        assert_eq!(resumed.get(), 2, "todos los waiters retoman juntos");

        // Un caller tardío retorna sin suspender
        let late = Rc::new(Cell::new(false));
        {
            let store = store.clone();
            let late = late.clone();
            spawner
                .spawn_local(async move {
                    store.wait_for_auth().await;
                    late.set(true);
                })
                .unwrap();
        }
        pool.run_until_stalled();
        assert!(late.get());
    }

    #[test]
    fn store_notifies_subscribers_on_transitions() {
        let store = test_store();
        let notified = Rc::new(Cell::new(0u32));
        {
            let notified = notified.clone();
            store.subscribe(move || notified.set(notified.get() + 1));
        }

        store.on_auth_event(Some(identity("u1")));
        store.on_auth_event(None);
        assert_eq!(notified.get(), 2);
    }
}
