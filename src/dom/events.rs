// ============================================================================
// EVENT HANDLING - Listeners sobre elementos del DOM (solo WASM)
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners en elementos del DOM: al reemplazar el innerHTML del root el
//   navegador limpia los listeners asociados, así que closure.forget() es seguro.
// - Listeners globales (window): registrar UNA sola vez al inicio de la app.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

/// Helper genérico: registra y olvida el closure
pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    // Nota: closure.forget() es necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Click simple
pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    on_event(element, "click", move |_e| handler())
}

/// Change (inputs, selects, file)
pub fn on_change<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    on_event(element, "change", move |_e| handler())
}

/// Submit de formulario: siempre se cancela el envío nativo
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    on_event(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}
