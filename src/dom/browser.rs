// ============================================================================
// BROWSER DOCUMENT - Implementación de Document sobre el DOM real
// ============================================================================

use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::document::{Document, EventKind, Handler};
use crate::dom::element::{
    add_class, clear_value, field_value, first_file, query_all_by_test_id, query_by_test_id,
    remove_class, set_inner_html, set_text_content, window,
};
use crate::dom::events::{on_change, on_click, on_submit};
use crate::dom::markup::Markup;
use crate::models::ReceiptFile;

/// Punto de montaje (#root) del index.html
pub struct BrowserDocument {
    root: Element,
}

impl BrowserDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    fn log_js_error(action: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::error!("❌ [DOM] Error en {}: {:?}", action, e);
        }
    }
}

impl Document for BrowserDocument {
    fn mount(&self, markup: &Markup) {
        set_inner_html(&self.root, &markup.to_html());
    }

    fn add_class(&self, test_id: &str, class: &str) {
        if let Some(el) = query_by_test_id(&self.root, test_id, 0) {
            Self::log_js_error("add_class", add_class(&el, class));
        }
    }

    fn remove_class(&self, test_id: &str, class: &str) {
        if let Some(el) = query_by_test_id(&self.root, test_id, 0) {
            Self::log_js_error("remove_class", remove_class(&el, class));
        }
    }

    fn attribute(&self, test_id: &str, index: usize, name: &str) -> Option<String> {
        query_by_test_id(&self.root, test_id, index)?.get_attribute(name)
    }

    fn set_child_attribute(&self, test_id: &str, tag: &str, name: &str, value: &str) {
        let child = query_by_test_id(&self.root, test_id, 0)
            .and_then(|el| el.query_selector(tag).ok().flatten());
        if let Some(child) = child {
            Self::log_js_error("set_attribute", child.set_attribute(name, value));
        }
    }

    fn set_text(&self, test_id: &str, text: &str) {
        if let Some(el) = query_by_test_id(&self.root, test_id, 0) {
            set_text_content(&el, text);
        }
    }

    fn field_value(&self, test_id: &str) -> Option<String> {
        field_value(&query_by_test_id(&self.root, test_id, 0)?)
    }

    fn clear_field(&self, test_id: &str) {
        if let Some(el) = query_by_test_id(&self.root, test_id, 0) {
            clear_value(&el);
        }
    }

    fn selected_file(&self, test_id: &str) -> Option<ReceiptFile> {
        let file = first_file(&query_by_test_id(&self.root, test_id, 0)?)?;
        let mut receipt = ReceiptFile::new(file.name(), file.type_());
        receipt.blob = Some(file);
        Some(receipt)
    }

    fn listen(&self, test_id: &str, kind: EventKind, handler: Handler) {
        for (index, el) in query_all_by_test_id(&self.root, test_id).into_iter().enumerate() {
            let handler = handler.clone();
            let callback = move || handler(index);
            let result = match kind {
                EventKind::Click => on_click(&el, callback),
                EventKind::Change => on_change(&el, callback),
                EventKind::Submit => on_submit(&el, callback),
            };
            Self::log_js_error("listen", result);
        }
    }

    fn push_history(&self, path: &str) {
        let Some(win) = window() else {
            return;
        };
        let origin = win.location().origin().unwrap_or_default();
        let url = format!("{}/{}", origin, path.trim_start_matches('/'));
        if let Ok(history) = win.history() {
            Self::log_js_error(
                "push_state",
                history.push_state_with_url(&JsValue::NULL, "", Some(&url)),
            );
        }
    }
}
