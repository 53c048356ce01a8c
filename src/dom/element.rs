// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM (solo WASM)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Selector CSS de un data-testid
pub fn test_id_selector(test_id: &str) -> String {
    format!("[data-testid=\"{}\"]", test_id)
}

/// Todos los elementos con ese data-testid bajo `root`, en orden de documento
pub fn query_all_by_test_id(root: &Element, test_id: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(&test_id_selector(test_id)) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Elemento `index` con ese data-testid
pub fn query_by_test_id(root: &Element, test_id: &str, index: usize) -> Option<Element> {
    query_all_by_test_id(root, test_id).into_iter().nth(index)
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}

/// Remover clase
pub fn remove_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().remove_1(class)
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Valor de input, select o textarea
pub fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    element
        .dyn_ref::<web_sys::HtmlTextAreaElement>()
        .map(|area| area.value())
}

/// Vaciar input (incluye los de tipo file)
pub fn clear_value(element: &Element) {
    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        input.set_value("");
    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.set_value("");
    }
}

/// Primer fichero de un input type=file
pub fn first_file(element: &Element) -> Option<web_sys::File> {
    element
        .dyn_ref::<web_sys::HtmlInputElement>()?
        .files()?
        .get(0)
}
