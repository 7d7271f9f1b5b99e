/// Clave de localStorage con la sesión de auth persistida
pub const STORAGE_KEY_AUTH_SESSION: &str = "auth_session";

/// Clave de sessionStorage con el toast pendiente entre recargas
pub const PENDING_TOAST_KEY: &str = "pending_toast";

/// TTL de la sesión persistida: más vieja que esto se descarta al restaurar
pub const AUTH_SESSION_TTL_HOURS: i64 = 24;
