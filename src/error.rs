// ============================================================================
// ERROR - Taxonomía de errores de la aplicación
// ============================================================================

use thiserror::Error;

/// Errores de la capa core (stores, router, servicios backend)
#[derive(Debug, Error)]
pub enum AppError {
    /// Falla construyendo el cliente backend. Fatal: aborta el arranque.
    #[error("startup init failed: {0}")]
    StartupInit(String),

    /// Falla en una operación de autenticación (sign-in/sign-out).
    /// El estado local de sesión queda intacto.
    #[error("auth operation failed: {0}")]
    AuthOperation(String),

    /// Payload persistido que no cumple el esquema esperado.
    #[error("malformed payload: {0}")]
    Deserialization(String),

    /// Storage del navegador inaccesible o fallo de lectura/escritura.
    #[error("browser storage error: {0}")]
    Storage(String),

    /// Fallo HTTP genérico contra el backend.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        AppError::Request(err.to_string())
    }
}
