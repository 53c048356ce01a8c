// ============================================================================
// BILLS VIEWMODEL - Contenedor de "Mes notes de frais"
// ============================================================================
// Carga + formateo de las notas, modal del justificante, botón "nueva nota"
// ============================================================================

use std::rc::Rc;

use crate::dom::{Document, EventKind};
use crate::error::StoreError;
use crate::models::DisplayBill;
use crate::router::{Navigator, RoutePath};
use crate::services::Store;
use crate::utils::constants::MODAL_SHOW_CLASS;
use crate::utils::format::{encode_uri, prepare_bills};

const RECEIPT_MODAL: &str = "modaleFileEmployee";

pub struct BillsViewModel {
    document: Rc<dyn Document>,
    store: Option<Rc<dyn Store>>,
    navigator: Navigator,
}

impl BillsViewModel {
    pub fn new(document: Rc<dyn Document>, store: Option<Rc<dyn Store>>, navigator: Navigator) -> Self {
        Self {
            document,
            store,
            navigator,
        }
    }

    /// Notas del usuario, formateadas y en orden anti-cronológico.
    /// Sin store: lista vacía.
    pub async fn get_bills(&self) -> Result<Vec<DisplayBill>, StoreError> {
        let Some(store) = &self.store else {
            log::warn!("⚠️ [BILLS] Sin store, lista vacía");
            return Ok(Vec::new());
        };

        log::info!("📋 [BILLS] Obteniendo notas de gastos...");
        let raw = store.bills().list().await.map_err(|e| {
            log::error!("❌ [BILLS] Error obteniendo notas: {}", e);
            e
        })?;
        log::info!("✅ [BILLS] {} notas recibidas", raw.len());
        Ok(prepare_bills(raw))
    }

    /// Abrir el justificante en el modal.
    /// La URL sale del icono pulsado; si no la tiene, de `bills[bill_index]`.
    pub fn handle_click_icon_eye(&self, icon: usize, bills: &[DisplayBill], bill_index: usize) {
        let url = self
            .document
            .attribute("icon-eye", icon, "data-bill-url")
            .filter(|url| !url.is_empty())
            .or_else(|| bills.get(bill_index).map(|b| b.bill.file_url.clone()));

        let Some(url) = url else {
            log::warn!("⚠️ [BILLS] Icono {} sin justificante", icon);
            return;
        };

        self.document
            .set_child_attribute(RECEIPT_MODAL, "img", "src", &encode_uri(&url));
        self.document.add_class(RECEIPT_MODAL, MODAL_SHOW_CLASS);
    }

    pub fn handle_close_modal(&self) {
        self.document.remove_class(RECEIPT_MODAL, MODAL_SHOW_CLASS);
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(RoutePath::NewBill);
    }

    /// Enlazar listeners tras montar la lista
    pub fn bind(self: &Rc<Self>, bills: Rc<Vec<DisplayBill>>) {
        let vm = self.clone();
        self.document.listen(
            "btn-new-bill",
            EventKind::Click,
            Rc::new(move |_: usize| vm.handle_click_new_bill()),
        );

        let vm = self.clone();
        self.document.listen(
            "icon-eye",
            EventKind::Click,
            Rc::new(move |index: usize| vm.handle_click_icon_eye(index, &bills, index)),
        );

        let vm = self.clone();
        self.document.listen(
            "modal-close",
            EventKind::Click,
            Rc::new(move |_: usize| vm.handle_close_modal()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::VirtualDocument;
    use crate::testing::{fixture_display_bills, Harness, MockStore};
    use crate::views::render_bills;
    use futures::executor::block_on;

    fn mounted(bills: &[DisplayBill]) -> (Rc<VirtualDocument>, BillsViewModel) {
        let document = Rc::new(VirtualDocument::new());
        document.mount(&render_bills(None, bills));
        let vm = BillsViewModel::new(document.clone(), None, Navigator::detached());
        (document, vm)
    }

    #[test]
    fn get_bills_sorts_latest_first() {
        let store: Rc<dyn Store> = Rc::new(MockStore::with_fixtures());
        let vm = BillsViewModel::new(Rc::new(VirtualDocument::new()), Some(store), Navigator::detached());
        let bills = block_on(vm.get_bills()).unwrap();

        let dates: Vec<&str> = bills.iter().map(|b| b.raw_date()).collect();
        assert_eq!(dates, ["2004-04-04", "2003-03-03", "2002-02-02", "2001-01-01"]);
        assert_eq!(bills[0].date_label, "4 Avr. 04");
        assert_eq!(bills[0].status_label, "En attente");
    }

    #[test]
    fn get_bills_without_store_is_empty() {
        let vm = BillsViewModel::new(Rc::new(VirtualDocument::new()), None, Navigator::detached());
        assert_eq!(block_on(vm.get_bills()), Ok(Vec::new()));
    }

    #[test]
    fn get_bills_propagates_store_errors() {
        let store = Rc::new(MockStore::with_fixtures());
        store.bills_mock().fail_next_list(StoreError::from_message("Erreur 404"));
        let vm = BillsViewModel::new(Rc::new(VirtualDocument::new()), Some(store as Rc<dyn Store>), Navigator::detached());
        assert_eq!(
            block_on(vm.get_bills()),
            Err(StoreError::NotFound("Erreur 404".into()))
        );
    }

    #[test]
    fn eye_click_opens_modal_with_encoded_receipt() {
        let bills = fixture_display_bills();
        let (document, vm) = mounted(&bills);

        vm.handle_click_icon_eye(0, &bills, 1);

        let modal = document.get_by_test_id("modaleFileEmployee").unwrap();
        assert!(modal.has_class("show"));
        let src = modal.find_by_tag("img").and_then(|img| img.attribute("src")).unwrap();
        assert_eq!(src, encode_uri(&bills[0].bill.file_url));
        assert!(src.contains("%E2%80%A6"));
    }

    #[test]
    fn eye_click_falls_back_to_bill_index() {
        let bills = fixture_display_bills();
        // Iconos sin data-bill-url
        let mut stripped = bills.clone();
        for bill in &mut stripped {
            bill.bill.file_url.clear();
        }
        let (document, vm) = mounted(&stripped);

        vm.handle_click_icon_eye(0, &bills, 2);

        let modal = document.get_by_test_id("modaleFileEmployee").unwrap();
        let src = modal.find_by_tag("img").and_then(|img| img.attribute("src"));
        assert_eq!(src, Some(encode_uri(&bills[2].bill.file_url).as_str()));
    }

    #[test]
    fn close_button_hides_modal() {
        let bills = fixture_display_bills();
        let (document, vm) = mounted(&bills);
        vm.handle_click_icon_eye(1, &bills, 1);
        vm.handle_close_modal();
        assert!(!document.get_by_test_id("modaleFileEmployee").unwrap().has_class("show"));
    }

    #[test]
    fn clicking_icons_through_the_page() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"a@a"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        let icons = harness.document.get_all_by_test_id("icon-eye");
        assert_eq!(icons.len(), 4);
        assert!(harness.document.dispatch("icon-eye", EventKind::Click, 3));

        let modal = harness.document.get_by_test_id("modaleFileEmployee").unwrap();
        assert!(modal.has_class("show"));
        let expected = encode_uri(icons[3].attribute("data-bill-url").unwrap());
        assert_eq!(modal.find_by_tag("img").and_then(|img| img.attribute("src")), Some(expected.as_str()));
    }

    #[test]
    fn clicking_the_same_eye_twice_is_idempotent() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"a@a"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        let url = harness.document.get_all_by_test_id("icon-eye")[0]
            .attribute("data-bill-url")
            .unwrap()
            .to_string();
        let listeners = harness.document.listener_count("icon-eye", EventKind::Click);

        assert!(harness.document.dispatch("icon-eye", EventKind::Click, 0));
        assert!(harness.document.dispatch("icon-eye", EventKind::Click, 0));

        let modal = harness.document.get_by_test_id("modaleFileEmployee").unwrap();
        assert_eq!(modal.attribute("class"), Some("modal fade show"));
        assert_eq!(
            modal.find_by_tag("img").and_then(|img| img.attribute("src")),
            Some(encode_uri(&url).as_str())
        );
        assert_eq!(harness.document.listener_count("icon-eye", EventKind::Click), listeners);
    }

    #[test]
    fn new_bill_button_navigates() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"a@a"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        assert!(harness.document.dispatch("btn-new-bill", EventKind::Click, 0));
        assert_eq!(harness.router.current(), Some(RoutePath::NewBill));
        assert!(harness.document.has_text("Envoyer une note de frais"));
    }
}
