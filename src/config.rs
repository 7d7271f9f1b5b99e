use serde::{Deserialize, Serialize};

/// Registro estático de configuración del proyecto backend.
/// Identificadores y claves del proyecto: se inicializa una vez al
/// arranque y nunca se reconfigura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: "demo-api-key".to_string(),
            auth_domain: "portal-demo.backendapp.dev".to_string(),
            project_id: "portal-demo".to_string(),
            storage_bucket: "portal-demo.appstorage.dev".to_string(),
            messaging_sender_id: "000000000000".to_string(),
            app_id: "1:000000000000:web:portal".to_string(),
        }
    }
}

impl BackendConfig {
    /// URL base del servicio de identidad
    pub fn auth_base_url(&self) -> String {
        format!("https://{}/identity/v1", self.auth_domain)
    }

    /// URL base de la base de datos de documentos
    pub fn database_base_url(&self) -> String {
        format!(
            "https://db.{}/v1/projects/{}/documents",
            self.auth_domain, self.project_id
        )
    }

    /// URL base del almacenamiento de ficheros
    pub fn storage_base_url(&self) -> String {
        format!("https://storage.{}/v1/b/{}/o", self.auth_domain, self.storage_bucket)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub environment: String,
    pub enable_logging: bool,
    /// Tiempo máximo que el guard espera la primera resolución de auth
    pub auth_wait_timeout_ms: u32,
    /// Duración por defecto de un toast
    pub toast_duration_ms: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            environment: "development".to_string(),
            enable_logging: true,
            auth_wait_timeout_ms: 10_000,
            toast_duration_ms: 3_000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = BackendConfig::default();
        Self {
            backend: BackendConfig {
                api_key: option_env!("BACKEND_API_KEY")
                    .map(String::from).unwrap_or(defaults.api_key),
                auth_domain: option_env!("BACKEND_AUTH_DOMAIN")
                    .map(String::from).unwrap_or(defaults.auth_domain),
                project_id: option_env!("BACKEND_PROJECT_ID")
                    .map(String::from).unwrap_or(defaults.project_id),
                storage_bucket: option_env!("BACKEND_STORAGE_BUCKET")
                    .map(String::from).unwrap_or(defaults.storage_bucket),
                messaging_sender_id: option_env!("BACKEND_MESSAGING_SENDER_ID")
                    .map(String::from).unwrap_or(defaults.messaging_sender_id),
                app_id: option_env!("BACKEND_APP_ID")
                    .map(String::from).unwrap_or(defaults.app_id),
            },
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            auth_wait_timeout_ms: option_env!("AUTH_WAIT_TIMEOUT_MS")
                .unwrap_or("10000").parse().unwrap_or(10_000),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .unwrap_or("3000").parse().unwrap_or(3_000),
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_urls_use_project_record() {
        let config = BackendConfig::default();
        assert!(config.auth_base_url().starts_with("https://portal-demo.backendapp.dev"));
        assert!(config.database_base_url().contains("/projects/portal-demo/"));
        assert!(config.storage_base_url().contains(&config.storage_bucket));
    }
}
