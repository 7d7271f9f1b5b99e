// ============================================================================
// APP STATE - Composition root del estado de la aplicación
// ============================================================================
// Los stores no son singletons ambientales: viven aquí y se pasan por
// referencia al router y a las vistas.
// ============================================================================

use crate::services::BackendClient;
use crate::state::{NotificationStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub session: SessionStore,
    pub notifications: NotificationStore,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        let session = SessionStore::new(backend.auth().clone());
        Self {
            backend,
            session,
            notifications: NotificationStore::new(),
        }
    }
}
