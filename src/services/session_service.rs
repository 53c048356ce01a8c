// ============================================================================
// SESSION SERVICE - Registro "user" en localStorage
// ============================================================================

use std::rc::Rc;

use crate::models::Session;
use crate::utils::constants::{JWT_STORAGE_KEY, USER_STORAGE_KEY};
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStorage};

/// Acceso a la sesión persistida
#[derive(Clone)]
pub struct SessionService {
    storage: Rc<dyn KeyValueStorage>,
}

impl SessionService {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Sesión actual; un registro corrupto cuenta como "sin sesión"
    pub fn current(&self) -> Option<Session> {
        match load_from_storage::<Session>(self.storage.as_ref(), USER_STORAGE_KEY) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("⚠️ [SESSION] Registro de sesión ignorado: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), String> {
        save_to_storage(self.storage.as_ref(), USER_STORAGE_KEY, session)?;
        log::info!("💾 [SESSION] Sesión guardada ({})", session.user_type.as_str());
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(JWT_STORAGE_KEY)
    }

    pub fn save_token(&self, jwt: &str) -> Result<(), String> {
        self.storage.set_item(JWT_STORAGE_KEY, jwt)
    }

    /// Logout: se borra todo el almacenamiento
    pub fn clear(&self) -> Result<(), String> {
        self.storage.clear()?;
        log::info!("🗑️ [SESSION] Sesión eliminada");
        Ok(())
    }
}
