// Fixtures y dobles de prueba compartidos por los tests de módulos

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::executor::LocalPool;

use crate::dom::VirtualDocument;
use crate::error::StoreError;
use crate::models::{Bill, BillDraft, BillStatus, Credentials, DisplayBill, LoginResponse, NewUser};
use crate::router::Router;
use crate::services::{BillsResource, SessionService, Store};
use crate::utils::format::prepare_bills;
use crate::utils::storage::{KeyValueStorage, MemoryStorage};

fn fixture_bill(id: &str, date: &str, amount: f64, expense_type: &str, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: format!("note {}", id),
        amount,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        comment_admin: format!("commentaire admin {}", id),
        file_url: format!(
            "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token={}",
            id
        ),
        file_name: format!("preview-facture-{}.jpg", id),
        status,
    }
}

/// Cuatro notas desordenadas, como las devuelve el backend
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        fixture_bill("47qAXb6fIm2zOKkLzMro", "2004-04-04", 400.0, "Hôtel et logement", BillStatus::Pending),
        fixture_bill("BeKy5Mo4jkmdfPGYpTxZ", "2001-01-01", 100.0, "Transports", BillStatus::Refused),
        fixture_bill("UIUZtnPQvnbFnB0ozvJh", "2003-03-03", 300.0, "Services en ligne", BillStatus::Accepted),
        fixture_bill("qcCK3SzECmaZAGRrHjaC", "2002-02-02", 200.0, "Restaurants et bars", BillStatus::Refused),
    ]
}

/// Las mismas notas, formateadas y ordenadas
pub fn fixture_display_bills() -> Vec<DisplayBill> {
    prepare_bills(fixture_bills())
}

/// Recurso bills en memoria
#[derive(Default)]
pub struct MockBills {
    records: RefCell<Vec<Bill>>,
    fail_next_list: RefCell<Option<StoreError>>,
    fail_next_write: RefCell<Option<StoreError>>,
    created: RefCell<Vec<BillDraft>>,
    updated: RefCell<Vec<Bill>>,
}

impl MockBills {
    /// El próximo list() falla con este error
    pub fn fail_next_list(&self, error: StoreError) {
        *self.fail_next_list.borrow_mut() = Some(error);
    }

    /// El próximo create()/update() falla con este error
    pub fn fail_next_write(&self, error: StoreError) {
        *self.fail_next_write.borrow_mut() = Some(error);
    }

    pub fn created(&self) -> Vec<BillDraft> {
        self.created.borrow().clone()
    }

    pub fn updated(&self) -> Vec<Bill> {
        self.updated.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BillsResource for MockBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        if let Some(error) = self.fail_next_list.borrow_mut().take() {
            return Err(error);
        }
        Ok(self.records.borrow().clone())
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        if let Some(error) = self.fail_next_write.borrow_mut().take() {
            return Err(error);
        }
        let mut bill = draft.bill.clone();
        bill.id = format!("new-{}", self.created.borrow().len() + 1);
        if let Some(file) = &draft.file {
            bill.file_url = format!("https://localhost:3456/images/{}", file.name);
            bill.file_name = file.name.clone();
        }
        self.created.borrow_mut().push(draft);
        self.records.borrow_mut().push(bill.clone());
        Ok(bill)
    }

    async fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        if let Some(error) = self.fail_next_write.borrow_mut().take() {
            return Err(error);
        }
        let mut records = self.records.borrow_mut();
        let Some(existing) = records.iter_mut().find(|b| b.id == bill.id) else {
            return Err(StoreError::from_status(404, format!("Erreur 404: {}", bill.id)));
        };
        *existing = bill.clone();
        self.updated.borrow_mut().push(bill.clone());
        Ok(bill.clone())
    }
}

/// Store en memoria: bills + usuarios conocidos
#[derive(Default)]
pub struct MockStore {
    bills: Rc<MockBills>,
    known_users: RefCell<Vec<String>>,
    logins: RefCell<Vec<Credentials>>,
    created_users: RefCell<Vec<NewUser>>,
}

impl MockStore {
    pub fn with_fixtures() -> Self {
        let store = Self::default();
        *store.bills.records.borrow_mut() = fixture_bills();
        store
    }

    pub fn bills_mock(&self) -> Rc<MockBills> {
        self.bills.clone()
    }

    pub fn register(&self, email: &str) {
        self.known_users.borrow_mut().push(email.to_string());
    }

    pub fn logins(&self) -> Vec<Credentials> {
        self.logins.borrow().clone()
    }

    pub fn created_users(&self) -> Vec<NewUser> {
        self.created_users.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Store for MockStore {
    fn bills(&self) -> Rc<dyn BillsResource> {
        self.bills.clone()
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, StoreError> {
        self.logins.borrow_mut().push(credentials.clone());
        if self.known_users.borrow().contains(&credentials.email) {
            Ok(LoginResponse {
                jwt: format!("jwt-{}", credentials.email),
            })
        } else {
            Err(StoreError::from_status(401, "Erreur 401"))
        }
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        self.created_users.borrow_mut().push(user.clone());
        self.known_users.borrow_mut().push(user.email.clone());
        Ok(())
    }
}

/// Router completo sobre documento/almacenamiento en memoria
pub struct Harness {
    pub pool: LocalPool,
    pub document: Rc<VirtualDocument>,
    pub storage: Rc<MemoryStorage>,
    pub session: SessionService,
    pub router: Router,
}

impl Harness {
    pub fn new(store: Option<Rc<MockStore>>) -> Self {
        let pool = LocalPool::new();
        let document = Rc::new(VirtualDocument::new());
        let storage = Rc::new(MemoryStorage::new());
        let session = SessionService::new(storage.clone());
        let router = Router::new(
            document.clone(),
            store.map(|s| s as Rc<dyn Store>),
            session.clone(),
            Rc::new(pool.spawner()),
        );
        Self {
            pool,
            document,
            storage,
            session,
            router,
        }
    }

    /// Escribe el registro "user" tal como lo haría la página de login
    pub fn login_as(&self, user_json: &str) {
        self.storage
            .set_item("user", user_json)
            .expect("memory storage never fails");
    }

    /// Ejecuta todas las tareas pendientes
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }
}
