// ============================================================================
// API CLIENT - Store REST sobre gloo-net (solo navegador)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP y clasifica errores
// ============================================================================

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use crate::error::StoreError;
use crate::models::{Bill, BillDraft, CreatedFile, Credentials, LoginResponse, NewUser};
use crate::services::session_service::SessionService;
use crate::services::store::{BillsResource, Store};

/// Cliente HTTP stateless; el token se lee del almacenamiento en cada request
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionService,
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionService) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(jwt) => builder.header("Authorization", &format!("Bearer {}", jwt)),
            None => builder,
        }
    }

    async fn send(&self, request: Request) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unknown(format!("Network error: {}", e)))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        log::error!("❌ [API] HTTP {} en {}", status, response.url());
        Err(StoreError::from_status(status, format!("Erreur {}", status)))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Unknown(format!("Parse error: {}", e)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let request = self
            .authorized(Request::get(&self.url(path)))
            .build()
            .map_err(|e| StoreError::Unknown(format!("Request build error: {}", e)))?;
        Self::parse(self.send(request).await?).await
    }

    pub async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let request = self
            .authorized(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| StoreError::Unknown(format!("Serialization error: {}", e)))?;
        Self::parse(self.send(request).await?).await
    }

    pub async fn patch_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let request = self
            .authorized(Request::patch(&self.url(path)))
            .json(body)
            .map_err(|e| StoreError::Unknown(format!("Serialization error: {}", e)))?;
        Self::parse(self.send(request).await?).await
    }

    /// POST multipart (sin Content-Type: lo pone el navegador)
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<T, StoreError> {
        let request = self
            .authorized(Request::post(&self.url(path)))
            .body(JsValue::from(form))
            .map_err(|e| StoreError::Unknown(format!("Request build error: {}", e)))?;
        Self::parse(self.send(request).await?).await
    }
}

/// Recurso /bills
pub struct RestBills {
    api: ApiClient,
}

impl RestBills {
    fn receipt_form(draft: &BillDraft) -> Result<web_sys::FormData, StoreError> {
        let js_err = |e: JsValue| StoreError::Unknown(format!("FormData error: {:?}", e));
        let form = web_sys::FormData::new().map_err(js_err)?;
        form.append_with_str("email", &draft.bill.email).map_err(js_err)?;
        if let Some(file) = &draft.file {
            if let Some(blob) = &file.blob {
                form.append_with_blob_and_filename("file", blob, &file.name)
                    .map_err(js_err)?;
            }
        }
        Ok(form)
    }
}

#[async_trait(?Send)]
impl BillsResource for RestBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let bills: Vec<Bill> = self.api.get("bills").await?;
        log::info!("✅ [API] {} bills recibidas", bills.len());
        Ok(bills)
    }

    /// Dos pasos: subida del justificante (devuelve key + fileUrl) y PATCH con los datos
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        let form = Self::receipt_form(&draft)?;
        let created: CreatedFile = self.api.post_form("bills", form).await?;
        log::info!("📎 [API] Justificante subido: {}", created.key);

        let mut bill = draft.bill;
        bill.id = created.key.clone();
        bill.file_url = created.file_url;
        self.api.patch_json(&format!("bills/{}", created.key), &bill).await
    }

    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        self.api.patch_json(&format!("bills/{}", bill.id), bill).await
    }
}

/// Store REST completo
pub struct RestStore {
    api: ApiClient,
    bills: Rc<RestBills>,
}

impl RestStore {
    pub fn new(base_url: &str, session: SessionService) -> Self {
        let api = ApiClient::new(base_url, session);
        Self {
            bills: Rc::new(RestBills { api: api.clone() }),
            api,
        }
    }
}

#[async_trait(?Send)]
impl Store for RestStore {
    fn bills(&self) -> Rc<dyn BillsResource> {
        self.bills.clone()
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, StoreError> {
        log::info!("🔐 [API] Login de {}", credentials.email);
        self.api.post_json("auth/login", credentials).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        log::info!("👤 [API] Creando usuario {}", user.email);
        let _: serde_json::Value = self.api.post_json("users", user).await?;
        Ok(())
    }
}
