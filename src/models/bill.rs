use serde::{Deserialize, Serialize};

/// Estado de validación de una nota de gastos
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub const ALL: [BillStatus; 3] = [Self::Pending, Self::Accepted, Self::Refused];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Refused => "refused",
        }
    }
}

fn default_pct() -> u32 {
    20
}

/// Nota de gastos tal como la guarda el backend
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    /// Fecha ISO-8601 sin formatear (clave de orden)
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vat: String,
    #[serde(default = "default_pct")]
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub comment_admin: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub status: BillStatus,
}

/// Bill + etiquetas de presentación (fecha y estado formateados)
#[derive(Clone, PartialEq, Debug)]
pub struct DisplayBill {
    pub bill: Bill,
    pub date_label: String,
    pub status_label: String,
}

impl DisplayBill {
    /// Fecha original, usada para ordenar
    pub fn raw_date(&self) -> &str {
        &self.bill.date
    }
}

/// Justificante elegido en el input "file"
#[derive(Clone, Debug)]
pub struct ReceiptFile {
    pub name: String,
    pub content_type: String,
    /// Fichero real del navegador (solo en WASM)
    #[cfg(target_arch = "wasm32")]
    pub blob: Option<web_sys::File>,
}

impl ReceiptFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            #[cfg(target_arch = "wasm32")]
            blob: None,
        }
    }

    /// Extensión en minúsculas, sin el punto
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

/// Payload de creación: la nota + su justificante
#[derive(Clone, Debug)]
pub struct BillDraft {
    pub bill: Bill,
    pub file: Option<ReceiptFile>,
}

/// Respuesta de POST /bills (subida del justificante)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFile {
    pub file_url: String,
    pub key: String,
}
