// ============================================================================
// DASHBOARD VIEWMODEL - Validación de notas (administrador)
// ============================================================================
// - get_bills_all_users: todas las notas, formateadas
// - handle_edit_ticket: abre/cierra el formulario de revisión de una nota
// - handle_accept_submit / handle_refuse_submit: update con commentAdmin
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Document, EventKind};
use crate::error::StoreError;
use crate::models::{Bill, BillStatus, DisplayBill};
use crate::router::{bind_logout, render_route, Navigator, RoutePath, RouteState};
use crate::services::{SessionService, Store, TaskSpawner};
use crate::utils::format::prepare_bills;

pub struct DashboardViewModel {
    document: Rc<dyn Document>,
    store: Option<Rc<dyn Store>>,
    session: SessionService,
    navigator: Navigator,
    spawner: Rc<dyn TaskSpawner>,
    bills: RefCell<Vec<DisplayBill>>,
    selected: RefCell<Option<String>>,
}

impl DashboardViewModel {
    pub fn new(
        document: Rc<dyn Document>,
        store: Option<Rc<dyn Store>>,
        session: SessionService,
        navigator: Navigator,
        spawner: Rc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            document,
            store,
            session,
            navigator,
            spawner,
            bills: RefCell::new(Vec::new()),
            selected: RefCell::new(None),
        }
    }

    pub async fn get_bills_all_users(&self) -> Result<Vec<DisplayBill>, StoreError> {
        let Some(store) = &self.store else {
            log::warn!("⚠️ [DASHBOARD] Sin store, lista vacía");
            return Ok(Vec::new());
        };

        let raw = store.bills().list().await.map_err(|e| {
            log::error!("❌ [DASHBOARD] Error obteniendo notas: {}", e);
            e
        })?;
        log::info!("✅ [DASHBOARD] {} notas para revisar", raw.len());
        Ok(prepare_bills(raw))
    }

    /// Id de la nota abierta
    pub fn selected(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    /// Guardar las notas cargadas y pintar el dashboard
    pub fn show(self: &Rc<Self>, bills: Vec<DisplayBill>) {
        *self.bills.borrow_mut() = bills;
        self.render();
    }

    fn render(self: &Rc<Self>) {
        let session = self.session.current();
        {
            let bills = self.bills.borrow();
            let selected = self.selected.borrow();
            let state = RouteState::new(session.as_ref())
                .with_bills(&bills)
                .with_selected(selected.as_deref());
            self.document.mount(&render_route(RoutePath::Dashboard, &state));
        }
        bind_logout(self.document.as_ref(), &self.session, &self.navigator);
        self.bind();
    }

    /// Click en una tarjeta: la abre, o la cierra si ya estaba abierta
    pub fn handle_edit_ticket(self: &Rc<Self>, index: usize) {
        let Some(id) = self.document.attribute("open-bill", index, "data-bill-id") else {
            log::warn!("⚠️ [DASHBOARD] Tarjeta {} inexistente", index);
            return;
        };

        let next = if self.selected().as_deref() == Some(id.as_str()) {
            None
        } else {
            Some(id)
        };
        *self.selected.borrow_mut() = next;
        self.render();
    }

    pub fn handle_accept_submit(&self) -> Option<Bill> {
        self.review(BillStatus::Accepted)
    }

    pub fn handle_refuse_submit(&self) -> Option<Bill> {
        self.review(BillStatus::Refused)
    }

    /// Actualizar la nota abierta con el estado y el comentario del admin
    fn review(&self, status: BillStatus) -> Option<Bill> {
        let id = self.selected()?;
        let mut bill = self
            .bills
            .borrow()
            .iter()
            .find(|b| b.bill.id == id)
            .map(|b| b.bill.clone())?;

        bill.status = status;
        bill.comment_admin = self.document.field_value("commentary2").unwrap_or_default();
        log::info!("📝 [DASHBOARD] Nota {} -> {}", bill.id, status.as_str());

        let Some(store) = self.store.clone() else {
            self.navigator.navigate(RoutePath::Dashboard);
            return Some(bill);
        };

        let navigator = self.navigator.clone();
        let update = bill.clone();
        self.spawner.spawn(Box::pin(async move {
            if let Err(e) = store.bills().update(&update).await {
                log::error!("❌ [DASHBOARD] Error actualizando nota {}: {}", update.id, e);
            }
            navigator.navigate(RoutePath::Dashboard);
        }));
        Some(bill)
    }

    fn bind(self: &Rc<Self>) {
        let vm = self.clone();
        self.document.listen(
            "open-bill",
            EventKind::Click,
            Rc::new(move |index: usize| vm.handle_edit_ticket(index)),
        );

        let vm = self.clone();
        self.document.listen(
            "btn-accept-bill",
            EventKind::Click,
            Rc::new(move |_: usize| {
                vm.handle_accept_submit();
            }),
        );

        let vm = self.clone();
        self.document.listen(
            "btn-refuse-bill",
            EventKind::Click,
            Rc::new(move |_: usize| {
                vm.handle_refuse_submit();
            }),
        );
    }
}
