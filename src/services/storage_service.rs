// ============================================================================
// STORAGE SERVICE - Capacidad de almacenamiento de ficheros
// ============================================================================
// Handle de paso al bucket de ficheros del proyecto. El core solo deriva
// URLs de objetos (avatar en el perfil); subir/borrar queda para las
// vistas que lo necesiten.
// ============================================================================

use gloo_net::http::Request;

use crate::config::BackendConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct StorageClient {
    base_url: String,
    api_key: String,
}

impl StorageClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base_url: config.storage_base_url(),
            api_key: config.api_key.clone(),
        }
    }

    /// URL pública de descarga de un objeto del bucket
    pub fn object_url(&self, path: &str) -> String {
        format!(
            "{}/{}?alt=media&key={}",
            self.base_url,
            path.trim_start_matches('/'),
            self.api_key
        )
    }

    /// Subir un objeto al bucket
    pub async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/{}?key={}",
            self.base_url,
            path.trim_start_matches('/'),
            self.api_key
        );
        let body = js_sys::Uint8Array::from(bytes.as_slice());
        let response = Request::post(&url)
            .header("Content-Type", content_type)
            .body(body)?
            .send()
            .await?;

        if !response.ok() {
            return Err(AppError::Request(format!(
                "upload {} HTTP {}",
                path,
                response.status()
            )));
        }
        Ok(())
    }
}
