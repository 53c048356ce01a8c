// ============================================================================
// STORE - Abstracción del backend (recursos con list/create/update)
// ============================================================================
// Los contenedores solo conocen estos traits; la implementación REST vive en
// api_client.rs y los tests usan un store en memoria
// ============================================================================

use std::rc::Rc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Bill, BillDraft, Credentials, LoginResponse, NewUser};

/// Recurso "bills" del backend
#[async_trait(?Send)]
pub trait BillsResource {
    /// Todas las notas visibles para el usuario conectado
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Crear una nota (con su justificante)
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError>;

    /// Actualizar una nota existente (selector = bill.id)
    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError>;
}

/// Backend completo
#[async_trait(?Send)]
pub trait Store {
    fn bills(&self) -> Rc<dyn BillsResource>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, StoreError>;

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError>;
}
