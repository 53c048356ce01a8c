// ============================================================================
// LOGIN VIEWMODEL - Formularios empleado / administrador
// ============================================================================
// Guarda el registro "user", pide un JWT al backend (creando el usuario si
// el login falla) y navega a la página de inicio del rol
// ============================================================================

use std::rc::Rc;

use crate::dom::{Document, EventKind};
use crate::models::{Credentials, NewUser, Session, UserType};
use crate::router::{home_for, Navigator};
use crate::services::{SessionService, Store, TaskSpawner};

pub struct LoginViewModel {
    document: Rc<dyn Document>,
    store: Option<Rc<dyn Store>>,
    session: SessionService,
    navigator: Navigator,
    spawner: Rc<dyn TaskSpawner>,
}

fn form_prefix(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Employee => "employee",
        UserType::Admin => "admin",
    }
}

/// Login; si falla se crea el usuario y se reintenta una vez
async fn authenticate(store: Rc<dyn Store>, sessions: SessionService, user_type: UserType, credentials: Credentials) {
    let response = match store.login(&credentials).await {
        Ok(response) => Ok(response),
        Err(e) => {
            log::warn!("⚠️ [LOGIN] Login rechazado ({}), creando usuario...", e);
            let user = NewUser::from_credentials(user_type, &credentials);
            match store.create_user(&user).await {
                Ok(()) => store.login(&credentials).await,
                Err(e) => Err(e),
            }
        }
    };

    match response {
        Ok(response) => {
            if let Err(e) = sessions.save_token(&response.jwt) {
                log::error!("❌ [LOGIN] Error guardando token: {}", e);
            } else {
                log::info!("✅ [LOGIN] Token recibido para {}", credentials.email);
            }
        }
        Err(e) => log::error!("❌ [LOGIN] Autenticación fallida: {}", e),
    }
}

impl LoginViewModel {
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
        }
    }

    pub fn handle_submit_employee(&self) -> Option<Session> {
        self.submit(UserType::Employee)
    }

    pub fn handle_submit_admin(&self) -> Option<Session> {
        self.submit(UserType::Admin)
    }

    fn submit(&self, user_type: UserType) -> Option<Session> {
        let prefix = form_prefix(user_type);
        let email = self
            .document
            .field_value(&format!("{}-email-input", prefix))
            .unwrap_or_default()
            .trim()
            .to_string();
        let password = self
            .document
            .field_value(&format!("{}-password-input", prefix))
            .unwrap_or_default();

        if email.is_empty() {
            log::warn!("⚠️ [LOGIN] Formulario {} sin email", prefix);
            return None;
        }

        let session = Session::new(user_type, email.clone());
        if let Err(e) = self.session.save(&session) {
            log::error!("❌ [LOGIN] Error guardando sesión: {}", e);
            return None;
        }

        let target = home_for(user_type);
        match self.store.clone() {
            None => self.navigator.navigate(target),
            Some(store) => {
                let sessions = self.session.clone();
                let navigator = self.navigator.clone();
                let credentials = Credentials { email, password };
                self.spawner.spawn(Box::pin(async move {
                    authenticate(store, sessions, user_type, credentials).await;
                    navigator.navigate(target);
                }));
            }
        }
        Some(session)
    }

    pub fn bind(self: &Rc<Self>) {
        let vm = self.clone();
        self.document.listen(
            "form-employee",
            EventKind::Submit,
            Rc::new(move |_: usize| {
                vm.handle_submit_employee();
            }),
        );

        let vm = self.clone();
        self.document.listen(
            "form-admin",
            EventKind::Submit,
            Rc::new(move |_: usize| {
                vm.handle_submit_admin();
            }),
        );
    }
}
