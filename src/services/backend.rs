// ============================================================================
// BACKEND CLIENT - Handle del backend-as-a-service
// ============================================================================
// Construye, a partir del registro estático de configuración, los tres
// handles de capacidad (auth, base de documentos, almacenamiento de
// ficheros). Es el único punto de integración con el backend: el resto
// de la app nunca construye sus propios clientes.
// ============================================================================

use std::cell::RefCell;

use crate::config::BackendConfig;
use crate::error::AppError;
use crate::services::{AuthClient, DbClient, StorageClient};

thread_local! {
    // Proyecto con el que se inicializó el backend en este proceso
    static INIT_PROJECT: RefCell<Option<String>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct BackendClient {
    auth: AuthClient,
    database: DbClient,
    storage: StorageClient,
}

impl BackendClient {
    /// Inicialización única a nivel de proceso. Un segundo init con una
    /// configuración DISTINTA falla; repetir con el mismo proyecto
    /// devuelve handles frescos. Cualquier fallo aquí es fatal para el
    /// arranque: no hay retry ni recuperación.
    pub fn init(config: &BackendConfig) -> Result<Self, AppError> {
        if config.api_key.is_empty() || config.project_id.is_empty() {
            return Err(AppError::StartupInit(
                "backend config incomplete: api_key and project_id are required".to_string(),
            ));
        }

        INIT_PROJECT.with(|cell| {
            let mut slot = cell.borrow_mut();
            match slot.as_deref() {
                Some(existing) if existing != config.project_id => {
                    Err(AppError::StartupInit(format!(
                        "backend already initialized for project '{}', refusing '{}'",
                        existing, config.project_id
                    )))
                }
                _ => {
                    *slot = Some(config.project_id.clone());
                    Ok(())
                }
            }
        })?;

        log::info!("🔌 Backend inicializado (proyecto: {})", config.project_id);

        Ok(Self {
            auth: AuthClient::new(config),
            database: DbClient::new(config),
            storage: StorageClient::new(config),
        })
    }

    /// Capacidad de autenticación
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Capacidad de base de datos de documentos
    pub fn database(&self) -> &DbClient {
        &self.database
    }

    /// Capacidad de almacenamiento de ficheros
    pub fn storage(&self) -> &StorageClient {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cada test corre en su propio thread, así que el thread_local de
    // inicialización arranca vacío en cada uno.

    #[test]
    fn init_twice_with_same_project_is_allowed() {
        let config = BackendConfig::default();
        BackendClient::init(&config).unwrap();
        BackendClient::init(&config).unwrap();
    }

    #[test]
    fn init_with_different_project_fails() {
        let config = BackendConfig::default();
        BackendClient::init(&config).unwrap();

        let other = BackendConfig {
            project_id: "another-project".to_string(),
            ..BackendConfig::default()
        };
        let err = BackendClient::init(&other).unwrap_err();
        assert!(matches!(err, AppError::StartupInit(_)));
    }

    #[test]
    fn init_with_empty_api_key_fails() {
        let config = BackendConfig {
            api_key: String::new(),
            ..BackendConfig::default()
        };
        assert!(matches!(
            BackendClient::init(&config),
            Err(AppError::StartupInit(_))
        ));
    }
}
