// ============================================================================
// NEW BILL VIEWMODEL - Contenedor del formulario "Envoyer une note de frais"
// ============================================================================
// - handle_change_file: valida la extensión del justificante (jpg/jpeg/png)
// - handle_submit: arma la nota, la crea en el store y vuelve a Bills
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Document, EventKind};
use crate::models::{Bill, BillDraft, BillStatus, ReceiptFile};
use crate::router::{Navigator, RoutePath};
use crate::services::{SessionService, Store, TaskSpawner};
use crate::utils::constants::{ACCEPTED_RECEIPT_EXTENSIONS, DEFAULT_PCT};

const FILE_ERROR_MESSAGE: &str = "Seuls les fichiers jpg, jpeg et png sont acceptés";

pub struct NewBillViewModel {
    document: Rc<dyn Document>,
    store: Option<Rc<dyn Store>>,
    session: SessionService,
    navigator: Navigator,
    spawner: Rc<dyn TaskSpawner>,
    receipt: RefCell<Option<ReceiptFile>>,
}

impl NewBillViewModel {
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
            receipt: RefCell::new(None),
        }
    }

    /// Justificante aceptado actualmente
    pub fn receipt(&self) -> Option<ReceiptFile> {
        self.receipt.borrow().clone()
    }

    /// Validar el fichero elegido. Un fichero no aceptado se descarta y
    /// el input se vacía.
    pub fn handle_change_file(&self) -> bool {
        let Some(file) = self.document.selected_file("file") else {
            log::warn!("⚠️ [NEW BILL] Cambio de fichero sin fichero");
            *self.receipt.borrow_mut() = None;
            return false;
        };

        let accepted = file
            .extension()
            .map(|ext| ACCEPTED_RECEIPT_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);

        if accepted {
            log::info!("📎 [NEW BILL] Justificante aceptado: {}", file.name);
            self.document.set_text("file-error", "");
            *self.receipt.borrow_mut() = Some(file);
        } else {
            log::warn!("⚠️ [NEW BILL] Justificante rechazado: {}", file.name);
            self.document.clear_field("file");
            self.document.set_text("file-error", FILE_ERROR_MESSAGE);
            *self.receipt.borrow_mut() = None;
        }
        accepted
    }

    /// Leer el formulario
    fn collect_bill(&self) -> Bill {
        let field = |test_id: &str| self.document.field_value(test_id).unwrap_or_default();
        let receipt = self.receipt.borrow();

        Bill {
            id: String::new(),
            email: self.session.current().map(|s| s.email).unwrap_or_default(),
            expense_type: field("expense-type"),
            name: field("expense-name"),
            amount: field("amount").trim().parse().unwrap_or(0.0),
            date: field("datepicker"),
            vat: field("vat"),
            pct: field("pct").trim().parse().unwrap_or(DEFAULT_PCT),
            commentary: field("commentary"),
            comment_admin: String::new(),
            file_url: String::new(),
            file_name: receipt.as_ref().map(|f| f.name.clone()).unwrap_or_default(),
            status: BillStatus::Pending,
        }
    }

    /// Enviar el formulario: crea la nota y navega a Bills.
    /// Sin store la nota no se guarda pero la navegación ocurre igual.
    /// Con store, sin justificante aceptado no se envía nada.
    pub fn handle_submit(&self) -> Bill {
        let bill = self.collect_bill();
        log::info!("📤 [NEW BILL] Enviando nota '{}' ({} €)", bill.name, bill.amount);

        let Some(store) = self.store.clone() else {
            log::warn!("⚠️ [NEW BILL] Sin store, la nota no se guarda");
            self.navigator.navigate(RoutePath::Bills);
            return bill;
        };

        let Some(file) = self.receipt() else {
            log::warn!("⚠️ [NEW BILL] Envío sin justificante válido, la nota no se crea");
            self.document.set_text("file-error", FILE_ERROR_MESSAGE);
            return bill;
        };

        let draft = BillDraft {
            bill: bill.clone(),
            file: Some(file),
        };
        let navigator = self.navigator.clone();
        self.spawner.spawn(Box::pin(async move {
            match store.bills().create(draft).await {
                Ok(created) => log::info!("✅ [NEW BILL] Nota creada: {}", created.id),
                Err(e) => log::error!("❌ [NEW BILL] Error creando nota: {}", e),
            }
            navigator.navigate(RoutePath::Bills);
        }));
        bill
    }

    pub fn bind(self: &Rc<Self>) {
        let vm = self.clone();
        self.document.listen(
            "file",
            EventKind::Change,
            Rc::new(move |_: usize| {
                vm.handle_change_file();
            }),
        );

        let vm = self.clone();
        self.document.listen(
            "form-new-bill",
            EventKind::Submit,
            Rc::new(move |_: usize| {
                vm.handle_submit();
            }),
        );
    }
}
