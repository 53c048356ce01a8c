// ============================================================================
// ROUTER - Tabla de rutas + navegación con control de sesión
// ============================================================================
// - navigate(path): busca la ruta, aplica el control de rol, monta la vista
//   y enlaza los listeners del contenedor
// - Bills y Dashboard: se monta "Loading..." y después llega el fetch
//   (render-then-refine); un fetch de una navegación anterior se descarta
// - Los contenedores reciben un Navigator (Weak) en lugar de un global
// ============================================================================

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::dom::{Document, EventKind, Markup};
use crate::error::StoreError;
use crate::models::{DisplayBill, Session, UserType};
use crate::services::{SessionService, Store, TaskSpawner};
use crate::utils::constants::ACTIVE_ICON_CLASS;
use crate::viewmodels::{BillsViewModel, DashboardViewModel, LoginViewModel, NewBillViewModel};
use crate::views::{render_bills, render_dashboard, render_error_page, render_loading_page, render_login, render_new_bill};

/// Rutas conocidas
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoutePath {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl RoutePath {
    pub const ALL: [RoutePath; 4] = [Self::Login, Self::Bills, Self::NewBill, Self::Dashboard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    /// Acepta "#employee/bills", "/#employee/bills", "" o "/"
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.starts_with("/#") { &path[1..] } else { path };
        if path.is_empty() {
            return Some(Self::Login);
        }
        Self::ALL.into_iter().find(|route| route.as_str() == path)
    }

    /// Rol necesario para ver la ruta (None = pública)
    pub fn required_role(self) -> Option<UserType> {
        match self {
            Self::Login => None,
            Self::Bills | Self::NewBill => Some(UserType::Employee),
            Self::Dashboard => Some(UserType::Admin),
        }
    }
}

/// Página de inicio de cada rol
pub fn home_for(user_type: UserType) -> RoutePath {
    match user_type {
        UserType::Employee => RoutePath::Bills,
        UserType::Admin => RoutePath::Dashboard,
    }
}

/// Datos disponibles para renderizar una ruta
#[derive(Clone, Copy, Default)]
pub struct RouteState<'a> {
    pub session: Option<&'a Session>,
    pub bills: &'a [DisplayBill],
    pub loading: bool,
    pub error: Option<&'a StoreError>,
    pub selected: Option<&'a str>,
}

impl<'a> RouteState<'a> {
    pub fn new(session: Option<&'a Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn loading(mut self) -> Self {
        self.loading = true;
        self
    }

    pub fn with_bills(mut self, bills: &'a [DisplayBill]) -> Self {
        self.bills = bills;
        self
    }

    pub fn with_error(mut self, error: &'a StoreError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_selected(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }
}

/// Entrada de la tabla de rutas
pub struct Route {
    pub path: RoutePath,
    pub render: fn(&RouteState<'_>) -> Markup,
}

fn render_login_route(_state: &RouteState<'_>) -> Markup {
    render_login()
}

fn render_bills_route(state: &RouteState<'_>) -> Markup {
    if state.loading {
        render_loading_page(state.session)
    } else if let Some(error) = state.error {
        render_error_page(state.session, Some(error))
    } else {
        render_bills(state.session, state.bills)
    }
}

fn render_new_bill_route(state: &RouteState<'_>) -> Markup {
    if state.loading {
        render_loading_page(state.session)
    } else {
        render_new_bill(state.session)
    }
}

fn render_dashboard_route(state: &RouteState<'_>) -> Markup {
    if state.loading {
        render_loading_page(state.session)
    } else if let Some(error) = state.error {
        render_error_page(state.session, Some(error))
    } else {
        render_dashboard(state.session, state.bills, state.selected)
    }
}

pub const ROUTES: [Route; 4] = [
    Route {
        path: RoutePath::Login,
        render: render_login_route,
    },
    Route {
        path: RoutePath::Bills,
        render: render_bills_route,
    },
    Route {
        path: RoutePath::NewBill,
        render: render_new_bill_route,
    },
    Route {
        path: RoutePath::Dashboard,
        render: render_dashboard_route,
    },
];

/// Renderizar una ruta de la tabla
pub fn render_route(path: RoutePath, state: &RouteState<'_>) -> Markup {
    match ROUTES.iter().find(|route| route.path == path) {
        Some(route) => (route.render)(state),
        None => render_login(),
    }
}

/// Icono activo del layout según la ruta
pub fn highlight_icon(document: &dyn Document, route: RoutePath) {
    let (active, inactive) = match route {
        RoutePath::Bills => ("icon-window", "icon-mail"),
        RoutePath::NewBill => ("icon-mail", "icon-window"),
        _ => return,
    };
    document.add_class(active, ACTIVE_ICON_CLASS);
    document.remove_class(inactive, ACTIVE_ICON_CLASS);
}

/// Botón de desconexión del layout: limpia el almacenamiento y vuelve al login
pub fn bind_logout(document: &dyn Document, session: &SessionService, navigator: &Navigator) {
    let session = session.clone();
    let navigator = navigator.clone();
    document.listen(
        "layout-disconnect",
        EventKind::Click,
        Rc::new(move |_: usize| {
            if let Err(e) = session.clear() {
                log::error!("❌ [ROUTER] Error en logout: {}", e);
            }
            navigator.navigate(RoutePath::Login);
        }),
    );
}

struct RouterInner {
    document: Rc<dyn Document>,
    store: Option<Rc<dyn Store>>,
    session: SessionService,
    spawner: Rc<dyn TaskSpawner>,
    generation: Cell<u64>,
    current: Cell<Option<RoutePath>>,
}

/// Router de la SPA
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

/// Handle de navegación para los contenedores (no mantiene vivo el router)
#[derive(Clone)]
pub struct Navigator {
    inner: Weak<RouterInner>,
}

impl Navigator {
    /// Navigator sin router: toda navegación se ignora
    pub fn detached() -> Self {
        Self { inner: Weak::new() }
    }

    pub fn navigate(&self, route: RoutePath) {
        match self.inner.upgrade() {
            Some(inner) => Router { inner }.navigate_to(route),
            None => log::warn!("⚠️ [ROUTER] Navegación a {} sin router activo", route.as_str()),
        }
    }
}

impl Router {
    pub fn new(
        document: Rc<dyn Document>,
        store: Option<Rc<dyn Store>>,
        session: SessionService,
        spawner: Rc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                document,
                store,
                session,
                spawner,
                generation: Cell::new(0),
                current: Cell::new(None),
            }),
        }
    }

    pub fn navigator(&self) -> Navigator {
        Navigator {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Ruta montada actualmente
    pub fn current(&self) -> Option<RoutePath> {
        self.inner.current.get()
    }

    /// Primer montaje al cargar la página (hash de la URL)
    pub fn start(&self, location: &str) {
        log::info!("🚀 [ROUTER] Inicio en '{}'", location);
        self.restore(location);
    }

    /// Punto de entrada de navegación (equivalente a onNavigate)
    pub fn navigate(&self, path: &str) {
        self.go(Self::lookup(path), true);
    }

    /// Volver a montar una ruta del historial (popstate) sin añadir entrada
    pub fn restore(&self, path: &str) {
        self.go(Self::lookup(path), false);
    }

    pub fn navigate_to(&self, requested: RoutePath) {
        self.go(requested, true);
    }

    fn lookup(path: &str) -> RoutePath {
        RoutePath::parse(path).unwrap_or_else(|| {
            log::warn!("⚠️ [ROUTER] Ruta desconocida '{}', redirigiendo al login", path);
            RoutePath::Login
        })
    }

    fn go(&self, requested: RoutePath, push_history: bool) {
        let session = self.inner.session.current();
        let route = Self::resolve(requested, session.as_ref());
        if route != requested {
            log::info!("🔒 [ROUTER] {} -> {}", requested.as_str(), route.as_str());
        }

        let generation = self.inner.generation.get() + 1;
        self.inner.generation.set(generation);
        self.inner.current.set(Some(route));
        if push_history {
            self.inner.document.push_history(route.as_str());
        }
        log::info!("🧭 [ROUTER] Navegando a {}", route.as_str());

        match (route, session) {
            (RoutePath::Bills, Some(session)) => self.show_bills(session, generation),
            (RoutePath::NewBill, Some(session)) => self.show_new_bill(session),
            (RoutePath::Dashboard, Some(session)) => self.show_dashboard(session, generation),
            _ => self.show_login(),
        }
    }

    /// Control de acceso: sin sesión -> login, rol equivocado -> su página de inicio
    fn resolve(requested: RoutePath, session: Option<&Session>) -> RoutePath {
        match (requested.required_role(), session) {
            (None, _) => requested,
            (Some(_), None) => RoutePath::Login,
            (Some(role), Some(session)) if session.user_type == role => requested,
            (Some(_), Some(session)) => home_for(session.user_type),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner.generation.get() == generation
    }

    /// Montar una ruta + wiring común (icono activo, logout)
    fn mount(&self, route: RoutePath, state: &RouteState<'_>) {
        let document = self.inner.document.as_ref();
        document.mount(&render_route(route, state));
        highlight_icon(document, route);
        if state.session.is_some() {
            bind_logout(document, &self.inner.session, &self.navigator());
        }
    }

    fn show_login(&self) {
        self.mount(RoutePath::Login, &RouteState::new(None));
        let vm = Rc::new(LoginViewModel::new(
            self.inner.document.clone(),
            self.inner.store.clone(),
            self.inner.session.clone(),
            self.navigator(),
            self.inner.spawner.clone(),
        ));
        vm.bind();
    }

    fn show_bills(&self, session: Session, generation: u64) {
        self.mount(RoutePath::Bills, &RouteState::new(Some(&session)).loading());

        let vm = Rc::new(BillsViewModel::new(
            self.inner.document.clone(),
            self.inner.store.clone(),
            self.navigator(),
        ));
        let router = self.clone();
        self.inner.spawner.spawn(Box::pin(async move {
            let result = vm.get_bills().await;
            if !router.is_current(generation) {
                log::debug!("[ROUTER] Resultado de bills descartado (navegación más reciente)");
                return;
            }
            match result {
                Ok(bills) => {
                    let state = RouteState::new(Some(&session)).with_bills(&bills);
                    router.mount(RoutePath::Bills, &state);
                    vm.bind(Rc::new(bills));
                }
                Err(error) => {
                    log::error!("❌ [ROUTER] Error cargando bills: {}", error);
                    router.mount(RoutePath::Bills, &RouteState::new(Some(&session)).with_error(&error));
                }
            }
        }));
    }

    fn show_new_bill(&self, session: Session) {
        self.mount(RoutePath::NewBill, &RouteState::new(Some(&session)));
        let vm = Rc::new(NewBillViewModel::new(
            self.inner.document.clone(),
            self.inner.store.clone(),
            self.inner.session.clone(),
            self.navigator(),
            self.inner.spawner.clone(),
        ));
        vm.bind();
    }

    fn show_dashboard(&self, session: Session, generation: u64) {
        self.mount(RoutePath::Dashboard, &RouteState::new(Some(&session)).loading());

        let vm = Rc::new(DashboardViewModel::new(
            self.inner.document.clone(),
            self.inner.store.clone(),
            self.inner.session.clone(),
            self.navigator(),
            self.inner.spawner.clone(),
        ));
        let router = self.clone();
        self.inner.spawner.spawn(Box::pin(async move {
            let result = vm.get_bills_all_users().await;
            if !router.is_current(generation) {
                log::debug!("[ROUTER] Resultado del dashboard descartado (navegación más reciente)");
                return;
            }
            match result {
                Ok(bills) => vm.show(bills),
                Err(error) => {
                    log::error!("❌ [ROUTER] Error cargando dashboard: {}", error);
                    router.mount(RoutePath::Dashboard, &RouteState::new(Some(&session)).with_error(&error));
                }
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::testing::{Harness, MockStore};

    #[test]
    fn parses_known_paths_and_rejects_unknown() {
        for route in RoutePath::ALL {
            assert_eq!(RoutePath::parse(route.as_str()), Some(route));
        }
        assert_eq!(RoutePath::parse(""), Some(RoutePath::Login));
        assert_eq!(RoutePath::parse("/#employee/bills"), Some(RoutePath::Bills));
        assert_eq!(RoutePath::parse("#nowhere"), None);
    }

    #[test]
    fn route_table_renders_every_path() {
        let state = RouteState::new(None);
        for route in RoutePath::ALL {
            let markup = render_route(route, &state);
            assert_eq!(markup.tag(), "div");
        }
        let loading = render_route(RoutePath::Bills, &RouteState::new(None).loading());
        assert!(loading.get_by_text("Loading...").is_some());
    }

    #[test]
    fn protected_route_without_session_shows_login() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        assert_eq!(harness.router.current(), Some(RoutePath::Login));
        assert!(harness.document.get_by_test_id("form-employee").is_some());
        assert!(harness.document.get_by_test_id("tbody").is_none());
    }

    #[test]
    fn unknown_path_falls_back_to_login() {
        let harness = Harness::new(None);
        harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
        harness.router.navigate("#employee/unknown");
        assert_eq!(harness.router.current(), Some(RoutePath::Login));
    }

    #[test]
    fn wrong_role_goes_to_its_own_home() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Admin","email":"a@a"}"#);
        harness.router.navigate(RoutePath::NewBill.as_str());
        harness.settle();
        assert_eq!(harness.router.current(), Some(RoutePath::Dashboard));
        assert_eq!(harness.document.location().as_deref(), Some("#admin/dashboard"));
    }

    #[test]
    fn bills_icon_is_highlighted_for_employee() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());

        // Antes del fetch: Loading + icono ya activo
        assert!(harness.document.has_text("Loading..."));
        assert!(harness.document.get_by_test_id("icon-window").unwrap().has_class("active-icon"));

        harness.settle();
        let window_icon = harness.document.get_by_test_id("icon-window").unwrap();
        assert!(window_icon.has_class("active-icon"));
        assert!(!harness.document.get_by_test_id("icon-mail").unwrap().has_class("active-icon"));
    }

    #[test]
    fn new_bill_highlights_mail_icon() {
        let harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee"}"#);
        harness.router.navigate(RoutePath::NewBill.as_str());
        assert!(harness.document.get_by_test_id("icon-mail").unwrap().has_class("active-icon"));
        assert!(!harness.document.get_by_test_id("icon-window").unwrap().has_class("active-icon"));
    }

    #[test]
    fn fetches_bills_from_mock_api() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        assert!(harness.document.has_text("Mes notes de frais"));
        assert!(harness.document.has_text("Hôtel et logement"));
        assert!(harness.document.has_text("Transports"));
        assert!(harness.document.get_by_test_id("tbody").is_some());
    }

    #[test]
    fn api_404_and_500_both_show_erreur() {
        for message in ["Erreur 404", "Erreur 500"] {
            let store = Rc::new(MockStore::with_fixtures());
            store.bills_mock().fail_next_list(StoreError::from_message(message));
            let mut harness = Harness::new(Some(store));
            harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
            harness.router.navigate(RoutePath::Bills.as_str());
            harness.settle();

            assert!(harness.document.has_text("Erreur"), "no error view for {}", message);
            assert!(harness.document.has_text(message));
            assert!(harness.document.get_by_test_id("tbody").is_none());
        }
    }

    #[test]
    fn stale_fetch_does_not_overwrite_newer_page() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.router.navigate(RoutePath::NewBill.as_str());
        harness.settle();

        assert_eq!(harness.router.current(), Some(RoutePath::NewBill));
        assert!(harness.document.get_by_test_id("form-new-bill").is_some());
        assert!(harness.document.get_by_test_id("tbody").is_none());
    }

    #[test]
    fn missing_store_renders_empty_list() {
        let mut harness = Harness::new(None);
        harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        let tbody = harness.document.get_by_test_id("tbody").unwrap();
        assert_eq!(tbody.element_children().count(), 0);
    }

    #[test]
    fn logout_clears_session_and_returns_to_login() {
        let mut harness = Harness::new(Some(Rc::new(MockStore::with_fixtures())));
        harness.login_as(r#"{"type":"Employee","email":"e@e"}"#);
        harness.router.navigate(RoutePath::Bills.as_str());
        harness.settle();

        assert!(harness.document.dispatch("layout-disconnect", EventKind::Click, 0));
        assert_eq!(harness.router.current(), Some(RoutePath::Login));
        assert_eq!(harness.session.current(), None);
    }

    #[test]
    fn restore_does_not_push_history() {
        let harness = Harness::new(None);
        harness.router.start("");
        assert_eq!(harness.document.location(), None);
        harness.router.navigate(RoutePath::Login.as_str());
        assert_eq!(harness.document.location().as_deref(), Some("/"));
    }

    #[test]
    fn navigator_outliving_router_does_not_panic() {
        let harness = Harness::new(None);
        let navigator = harness.router.navigator();
        drop(harness);
        navigator.navigate(RoutePath::Login);
    }
}
