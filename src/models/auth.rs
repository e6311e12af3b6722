use serde::{Deserialize, Serialize};

use crate::models::recipe::ResourceId;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Usuario autenticado tal como lo devuelve el backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Respuesta de /login y /register
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_tolerates_missing_user_and_extra_fields() {
        let res: AuthResponse = serde_json::from_str(
            r#"{"token":"abc","token_type":"Bearer","user":{"id":7,"name":"Ana","email":"ana@x.com","created_at":"2024"}}"#,
        )
        .unwrap();
        assert_eq!(res.token, "abc");
        let user = res.user.unwrap();
        assert_eq!(user.id.as_str(), "7");
        assert_eq!(user.name.as_deref(), Some("Ana"));

        let bare: AuthResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert!(bare.user.is_none());
    }
}
