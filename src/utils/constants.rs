/// Clave del registro de sesión en localStorage
pub const USER_STORAGE_KEY: &str = "user";

/// Clave del token devuelto por /auth/login
pub const JWT_STORAGE_KEY: &str = "jwt";

/// Id del punto de montaje en index.html
pub const ROOT_ELEMENT_ID: &str = "root";

/// Extensiones aceptadas para los justificantes
pub const ACCEPTED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Porcentaje de IVA por defecto cuando el campo está vacío
pub const DEFAULT_PCT: u32 = 20;

/// Categorías del select "expense-type"
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// Clase CSS del icono activo en el layout vertical
pub const ACTIVE_ICON_CLASS: &str = "active-icon";

/// Clase CSS que hace visible un modal
pub const MODAL_SHOW_CLASS: &str = "show";
