// ============================================================================
// DOCUMENT - Adaptador del punto de montaje
// ============================================================================
// Los contenedores y el router solo hablan con este trait:
// - BrowserDocument (dom/browser.rs): DOM real vía web_sys
// - VirtualDocument: árbol Markup en memoria, para tests nativos
// Los elementos se localizan siempre por data-testid.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::markup::Markup;
use crate::models::ReceiptFile;

/// Tipos de evento que se enlazan tras cada render
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

/// Handler de evento; recibe el índice del elemento entre los que comparten data-testid
pub type Handler = Rc<dyn Fn(usize)>;

pub trait Document {
    /// Reemplazar el contenido del punto de montaje (borra los listeners anteriores)
    fn mount(&self, markup: &Markup);

    fn add_class(&self, test_id: &str, class: &str);

    fn remove_class(&self, test_id: &str, class: &str);

    /// Atributo del elemento `index` con ese data-testid
    fn attribute(&self, test_id: &str, index: usize, name: &str) -> Option<String>;

    /// Atributo del primer descendiente `tag` del elemento
    fn set_child_attribute(&self, test_id: &str, tag: &str, name: &str, value: &str);

    fn set_text(&self, test_id: &str, text: &str);

    /// Valor actual de un input/select/textarea
    fn field_value(&self, test_id: &str) -> Option<String>;

    fn clear_field(&self, test_id: &str);

    /// Fichero elegido en un input type=file
    fn selected_file(&self, test_id: &str) -> Option<ReceiptFile>;

    /// Enlazar handler a todos los elementos con ese data-testid
    fn listen(&self, test_id: &str, kind: EventKind, handler: Handler);

    fn push_history(&self, path: &str);
}

/// Documento en memoria: mismo contrato que el DOM, inspeccionable desde tests
pub struct VirtualDocument {
    root: RefCell<Markup>,
    values: RefCell<HashMap<String, String>>,
    files: RefCell<HashMap<String, ReceiptFile>>,
    listeners: RefCell<Vec<(String, EventKind, Handler)>>,
    history: RefCell<Vec<String>>,
    mounts: Cell<usize>,
}

impl Default for VirtualDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualDocument {
    pub fn new() -> Self {
        Self {
            root: RefCell::new(Self::empty_root()),
            values: RefCell::new(HashMap::new()),
            files: RefCell::new(HashMap::new()),
            listeners: RefCell::new(Vec::new()),
            history: RefCell::new(Vec::new()),
            mounts: Cell::new(0),
        }
    }

    fn empty_root() -> Markup {
        Markup::new("div").id(crate::utils::constants::ROOT_ELEMENT_ID)
    }

    pub fn get_by_test_id(&self, test_id: &str) -> Option<Markup> {
        self.root.borrow().find_by_test_id(test_id).cloned()
    }

    pub fn get_all_by_test_id(&self, test_id: &str) -> Vec<Markup> {
        self.root
            .borrow()
            .find_all_by_test_id(test_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.root.borrow().get_by_text(text).is_some()
    }

    /// Simula que el usuario escribe en un campo
    pub fn fill(&self, test_id: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(test_id.to_string(), value.to_string());
    }

    /// Simula la selección de un fichero
    pub fn attach_file(&self, test_id: &str, file: ReceiptFile) {
        self.fill(test_id, &format!("C:\\fakepath\\{}", file.name));
        self.files.borrow_mut().insert(test_id.to_string(), file);
    }

    /// Dispara un evento (equivalente a fireEvent). false si el elemento no existe.
    pub fn dispatch(&self, test_id: &str, kind: EventKind, index: usize) -> bool {
        let exists = self.root.borrow().find_all_by_test_id(test_id).len() > index;
        if !exists {
            return false;
        }
        // Se clonan antes de llamar: un handler puede volver a montar
        let handlers: Vec<Handler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(id, k, _)| id == test_id && *k == kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(index);
        }
        true
    }

    pub fn listener_count(&self, test_id: &str, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(id, k, _)| id == test_id && *k == kind)
            .count()
    }

    /// Última ruta empujada al historial
    pub fn location(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn mount_count(&self) -> usize {
        self.mounts.get()
    }
}

impl Document for VirtualDocument {
    fn mount(&self, markup: &Markup) {
        *self.root.borrow_mut() = Self::empty_root().child(markup.clone());
        self.values.borrow_mut().clear();
        self.files.borrow_mut().clear();
        self.listeners.borrow_mut().clear();
        self.mounts.set(self.mounts.get() + 1);
    }

    fn add_class(&self, test_id: &str, class: &str) {
        if let Some(el) = self.root.borrow_mut().find_by_test_id_mut(test_id, 0) {
            el.add_class_name(class);
        }
    }

    fn remove_class(&self, test_id: &str, class: &str) {
        if let Some(el) = self.root.borrow_mut().find_by_test_id_mut(test_id, 0) {
            el.remove_class_name(class);
        }
    }

    fn attribute(&self, test_id: &str, index: usize, name: &str) -> Option<String> {
        let root = self.root.borrow();
        let el = root.find_all_by_test_id(test_id).into_iter().nth(index)?;
        el.attribute(name).map(str::to_string)
    }

    fn set_child_attribute(&self, test_id: &str, tag: &str, name: &str, value: &str) {
        let mut root = self.root.borrow_mut();
        if let Some(child) = root
            .find_by_test_id_mut(test_id, 0)
            .and_then(|el| el.find_by_tag_mut(tag))
        {
            child.set_attribute(name, value);
        }
    }

    fn set_text(&self, test_id: &str, text: &str) {
        if let Some(el) = self.root.borrow_mut().find_by_test_id_mut(test_id, 0) {
            el.set_text(text);
        }
    }

    fn field_value(&self, test_id: &str) -> Option<String> {
        if let Some(value) = self.values.borrow().get(test_id) {
            return Some(value.clone());
        }
        let root = self.root.borrow();
        let el = root.find_by_test_id(test_id)?;
        match el.tag() {
            "select" => {
                let mut options = el.element_children().filter(|o| o.tag() == "option");
                let selected = el
                    .element_children()
                    .find(|o| o.tag() == "option" && o.attribute("selected").is_some());
                selected
                    .or_else(|| options.next())
                    .map(|o| o.attribute("value").map(str::to_string).unwrap_or_else(|| o.text_content()))
            }
            "textarea" => Some(el.text_content()),
            _ => Some(el.attribute("value").unwrap_or_default().to_string()),
        }
    }

    fn clear_field(&self, test_id: &str) {
        self.values
            .borrow_mut()
            .insert(test_id.to_string(), String::new());
        self.files.borrow_mut().remove(test_id);
    }

    fn selected_file(&self, test_id: &str) -> Option<ReceiptFile> {
        self.files.borrow().get(test_id).cloned()
    }

    fn listen(&self, test_id: &str, kind: EventKind, handler: Handler) {
        self.listeners
            .borrow_mut()
            .push((test_id.to_string(), kind, handler));
    }

    fn push_history(&self, path: &str) {
        self.history.borrow_mut().push(path.to_string());
    }
}
