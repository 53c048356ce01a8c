// ============================================================================
// BILLED - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones puras que devuelven Markup (sin lógica)
// - ViewModels: contenedores de cada página (lógica UI)
// - Router: tabla de rutas, control de sesión, navegación
// - Services: sesión, store (REST en el navegador), tareas async
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod dom;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    // Instancia global de la app
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 Billed - Rust Puro + MVVM");

        let app = App::new()?;
        app.start()?;

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });
        Ok(())
    }

    /// Navegación desde JavaScript (equivalente a window.onNavigate)
    #[wasm_bindgen]
    pub fn on_navigate(path: &str) {
        APP.with(|cell| match cell.borrow().as_ref() {
            Some(app) => app.navigate(path),
            None => log::warn!("⚠️ [APP] App no está inicializada"),
        });
    }
}
