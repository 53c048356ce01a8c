// ============================================================================
// ERRORES DEL STORE - Fallos del backend clasificados
// ============================================================================
// Todos se muestran igual al usuario ("Erreur"), solo cambia el detalle
// ============================================================================

use thiserror::Error;

/// Texto visible en la vista de error, común a todos los fallos
pub const ERROR_TITLE: &str = "Erreur";

/// Error devuelto por cualquier operación del store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Recurso no encontrado (404)
    #[error("{0}")]
    NotFound(String),
    /// Fallo del servidor (5xx)
    #[error("{0}")]
    ServerError(String),
    /// Cualquier otro fallo (red, parseo, status inesperado)
    #[error("{0}")]
    Unknown(String),
}

impl StoreError {
    /// Clasificar según status HTTP
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            500..=599 => Self::ServerError(message),
            _ => Self::Unknown(message),
        }
    }

    /// Clasificar un mensaje libre ("Erreur 404", "Erreur 500", ...)
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let status = message
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| part.len() == 3)
            .find_map(|part| part.parse::<u16>().ok());

        match status {
            Some(code) => Self::from_status(code, message),
            None => Self::Unknown(message),
        }
    }

    /// Mensaje detallado tal como llegó del backend
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m) | Self::ServerError(m) | Self::Unknown(m) => m,
        }
    }

    /// Texto que ve el usuario, idéntico para todos los tipos
    pub fn user_message(&self) -> &'static str {
        ERROR_TITLE
    }
}
