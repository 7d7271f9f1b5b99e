// ============================================================================
// DATABASE SERVICE - Capacidad de base de documentos
// ============================================================================
// Handle de paso al servicio de documentos del backend. El core apenas
// lo usa (la vista de perfil lee el documento del usuario); el resto de
// la superficie queda disponible para las vistas de la app.
// ============================================================================

use gloo_net::http::Request;
use serde::Serialize;

use crate::config::BackendConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct DbClient {
    base_url: String,
    api_key: String,
}

impl DbClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base_url: config.database_base_url(),
            api_key: config.api_key.clone(),
        }
    }

    fn document_url(&self, path: &str) -> String {
        format!(
            "{}/{}?key={}",
            self.base_url,
            path.trim_start_matches('/'),
            self.api_key
        )
    }

    /// Leer un documento como JSON crudo
    pub async fn get_document(&self, path: &str) -> Result<serde_json::Value, AppError> {
        let response = Request::get(&self.document_url(path)).send().await?;

        if !response.ok() {
            return Err(AppError::Request(format!(
                "get {} HTTP {}",
                path,
                response.status()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(AppError::from)
    }

    /// Escribir (upsert) un documento
    pub async fn set_document<T: Serialize>(&self, path: &str, document: &T) -> Result<(), AppError> {
        let response = Request::patch(&self.document_url(path))
            .json(document)?
            .send()
            .await?;

        if !response.ok() {
            return Err(AppError::Request(format!(
                "set {} HTTP {}",
                path,
                response.status()
            )));
        }
        Ok(())
    }
}
