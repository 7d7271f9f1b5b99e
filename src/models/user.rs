use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identidad del usuario tal como la define el backend.
/// El resto de la app la trata como un valor opaco: se guarda y se
/// limpia, nunca se interpreta más allá de presencia/ausencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Body de sign-in / sign-up contra el servicio de identidad
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub return_secure_token: bool,
}

/// Respuesta del servicio de identidad para sign-in / sign-up
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl AuthResponse {
    pub fn into_identity(self) -> UserIdentity {
        UserIdentity {
            uid: self.local_id,
            email: self.email,
            display_name: self.display_name,
        }
    }
}

/// Body de revocación de sesión (sign-out)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutRequest {
    pub id_token: String,
}

/// Sesión de auth persistida en localStorage entre recargas.
/// `persisted_at` permite descartar registros viejos al restaurar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAuthSession {
    pub user: UserIdentity,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub persisted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_parses_backend_payload() {
        let json = r#"{
            "localId": "u-42",
            "email": "driver@example.com",
            "displayName": "Driver",
            "idToken": "tok",
            "refreshToken": "ref"
        }"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        let user = parsed.into_identity();
        assert_eq!(user.uid, "u-42");
        assert_eq!(user.display_name.as_deref(), Some("Driver"));
    }

    #[test]
    fn auth_response_tolerates_missing_optional_fields() {
        let json = r#"{"localId": "u-1", "email": "a@b.c", "idToken": "t"}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.display_name.is_none());
        assert!(parsed.refresh_token.is_none());
    }
}
