use serde::{Deserialize, Serialize};

/// Rol del usuario conectado
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum UserType {
    Employee,
    Admin,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Admin => "Admin",
        }
    }
}

/// Registro "user" guardado en localStorage
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

impl Session {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
        }
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}

/// Credenciales enviadas a /auth/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Usuario creado en el primer login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// El nombre se deriva de la parte local del email
    pub fn from_credentials(user_type: UserType, credentials: &Credentials) -> Self {
        let name = credentials
            .email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            user_type,
            name,
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        }
    }
}

/// Respuesta de /auth/login
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub jwt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_without_email_is_still_valid() {
        let session: Session = serde_json::from_str(r#"{"type":"Employee"}"#).unwrap();
        assert!(session.is_employee());
        assert_eq!(session.email, "");
    }

    #[test]
    fn session_round_trips_with_type_key() {
        let json = serde_json::to_string(&Session::new(UserType::Admin, "a@a")).unwrap();
        assert_eq!(json, r#"{"type":"Admin","email":"a@a"}"#);
    }

    #[test]
    fn new_user_name_comes_from_email() {
        let credentials = Credentials {
            email: "jane.doe@billed.com".into(),
            password: "secret".into(),
        };
        let user = NewUser::from_credentials(UserType::Employee, &credentials);
        assert_eq!(user.name, "jane.doe");
    }
}
