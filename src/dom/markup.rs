// ============================================================================
// MARKUP - Árbol de elementos puro (sin DOM)
// ============================================================================
// Las vistas construyen Markup con un builder y el Document lo monta.
// Al no depender de web_sys, las vistas se testean en nativo.
// ============================================================================

/// Nodo hijo: elemento o texto
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Markup),
    Text(String),
}

/// Elemento con atributos e hijos
#[derive(Clone, Debug, PartialEq)]
pub struct Markup {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

const VOID_TAGS: [&str; 6] = ["img", "input", "br", "hr", "meta", "link"];

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Markup {
    /// Crear nuevo builder para un elemento
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Establecer atributo (reemplaza si ya existe)
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Hook estable para tests y listeners
    pub fn test_id(self, test_id: &str) -> Self {
        self.attr("data-testid", test_id)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children<I: IntoIterator<Item = Markup>>(mut self, children: I) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    // ------------------------------------------------------------------------
    // Lectura
    // ------------------------------------------------------------------------

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Markup> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Texto de todos los descendientes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Solo los nodos de texto directos, con espacios normalizados
    pub fn own_text(&self) -> String {
        let joined: String = self
            .children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect();
        normalize_whitespace(&joined)
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Markup>) {
        out.push(self);
        for child in self.element_children() {
            child.walk(out);
        }
    }

    /// Recorrido en pre-orden (incluye self)
    pub fn descendants(&self) -> Vec<&Markup> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    pub fn find_all_by_test_id(&self, test_id: &str) -> Vec<&Markup> {
        self.descendants()
            .into_iter()
            .filter(|el| el.attribute("data-testid") == Some(test_id))
            .collect()
    }

    pub fn find_by_test_id(&self, test_id: &str) -> Option<&Markup> {
        self.find_all_by_test_id(test_id).into_iter().next()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Markup> {
        self.descendants().into_iter().find(|el| el.tag == tag)
    }

    /// Primer elemento cuyo texto propio coincide exactamente
    pub fn get_by_text(&self, text: &str) -> Option<&Markup> {
        let wanted = normalize_whitespace(text);
        self.descendants()
            .into_iter()
            .find(|el| el.own_text() == wanted)
    }

    // ------------------------------------------------------------------------
    // Mutación (usada por el documento en memoria)
    // ------------------------------------------------------------------------

    fn nth_mut<'a>(
        &'a mut self,
        matches: &dyn Fn(&Markup) -> bool,
        remaining: &mut usize,
    ) -> Option<&'a mut Markup> {
        if matches(self) {
            if *remaining == 0 {
                return Some(self);
            }
            *remaining -= 1;
        }
        for node in self.children.iter_mut() {
            if let Node::Element(el) = node {
                if let Some(found) = el.nth_mut(matches, remaining) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_by_test_id_mut(&mut self, test_id: &str, index: usize) -> Option<&mut Markup> {
        let mut remaining = index;
        self.nth_mut(
            &|el: &Markup| el.attribute("data-testid") == Some(test_id),
            &mut remaining,
        )
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Markup> {
        let mut remaining = 0;
        self.nth_mut(&|el: &Markup| el.tag == tag, &mut remaining)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, current)) => *current = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn add_class_name(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attribute("class") {
            Some(current) if !current.trim().is_empty() => format!("{} {}", current.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute("class", &classes);
    }

    pub fn remove_class_name(&mut self, class: &str) {
        let Some(current) = self.attribute("class") else {
            return;
        };
        let classes = current
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute("class", &classes);
    }

    /// Reemplaza todos los hijos por un único texto
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    // ------------------------------------------------------------------------
    // Serialización
    // ------------------------------------------------------------------------

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape(value, out);
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        for node in &self.children {
            match node {
                Node::Text(text) => escape(text, out),
                Node::Element(el) => el.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}
