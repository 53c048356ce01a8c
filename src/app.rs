// ============================================================================
// APP - Wiring del navegador (solo WASM)
// ============================================================================
// #root + localStorage + backend REST + spawn_local -> Router
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::CONFIG;
use crate::dom::element::{get_element_by_id, window};
use crate::dom::events::on_event;
use crate::dom::BrowserDocument;
use crate::router::Router;
use crate::services::{RestStore, SessionService, Store, WasmSpawner};
use crate::utils::constants::ROOT_ELEMENT_ID;
use crate::utils::storage::LocalStorage;

/// Aplicación principal
pub struct App {
    router: Router,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(ROOT_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str("No #root element found"))?;

        let session = SessionService::new(Rc::new(LocalStorage));
        let store: Rc<dyn Store> = Rc::new(RestStore::new(CONFIG.backend_url(), session.clone()));
        log::info!("🌐 [APP] Backend: {}", CONFIG.backend_url());

        let router = Router::new(
            Rc::new(BrowserDocument::new(root)),
            Some(store),
            session,
            Rc::new(WasmSpawner),
        );
        Ok(Self { router })
    }

    /// Montar la ruta de la URL actual y escuchar el historial
    pub fn start(&self) -> Result<(), JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        self.router.start(&win.location().hash().unwrap_or_default());

        // Listener global: se registra una sola vez
        let router = self.router.clone();
        on_event(&win, "popstate", move |_| {
            let hash = window()
                .and_then(|w| w.location().hash().ok())
                .unwrap_or_default();
            router.restore(&hash);
        })
    }

    pub fn navigate(&self, path: &str) {
        self.router.navigate(path);
    }
}
