// ============================================================================
// FORMAT - Etiquetas de presentación (fechas, estados, URLs)
// ============================================================================

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::models::{Bill, BillStatus, DisplayBill};

/// Meses abreviados (fr), capitalizados y cortados a 3 letras
const MONTHS_FR: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Caracteres que encodeURI() escapa (además de no-ASCII y controles)
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|datetime| datetime.date())
}

/// "2004-04-04" -> "4 Avr. 04"
/// Devuelve None si la fecha no se puede parsear
pub fn format_date(raw: &str) -> Option<String> {
    let date = parse_date(raw)?;
    let month = MONTHS_FR[date.month0() as usize];
    Some(format!("{} {}. {:02}", date.day(), month, date.year().rem_euclid(100)))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

/// Equivalente a encodeURI() de JavaScript
pub fn encode_uri(url: &str) -> String {
    utf8_percent_encode(url, URI_ESCAPE).to_string()
}

/// Convertir un registro del backend en fila de presentación
/// Una fecha corrupta no rompe la lista: se muestra tal cual
pub fn to_display_bill(bill: Bill) -> DisplayBill {
    let date_label = match format_date(&bill.date) {
        Some(label) => label,
        None => {
            log::warn!("⚠️ [FORMAT] Fecha inválida '{}' para bill {}", bill.date, bill.id);
            bill.date.clone()
        }
    };
    let status_label = format_status(bill.status).to_string();
    DisplayBill {
        bill,
        date_label,
        status_label,
    }
}

/// Orden anti-cronológico sobre la fecha sin formatear: cmp(a,b) = a<b ? 1 : -1
pub fn sort_anti_chrono(bills: &mut [DisplayBill]) {
    bills.sort_by(|a, b| b.raw_date().cmp(a.raw_date()));
}

/// Formatear + ordenar una respuesta completa del store
pub fn prepare_bills(raw: Vec<Bill>) -> Vec<DisplayBill> {
    let mut bills: Vec<DisplayBill> = raw.into_iter().map(to_display_bill).collect();
    sort_anti_chrono(&mut bills);
    bills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_french_short_dates() {
        assert_eq!(format_date("2004-04-04").as_deref(), Some("4 Avr. 04"));
        assert_eq!(format_date("2021-12-25").as_deref(), Some("25 Déc. 21"));
        assert_eq!(format_date("2001-01-01T10:00:00Z").as_deref(), Some("1 Jan. 01"));
    }

    #[test]
    fn unparseable_date_falls_back_to_raw_value() {
        assert_eq!(format_date("pas une date"), None);
        let row = to_display_bill(Bill {
            date: "2004-13-45".into(),
            ..Bill::default()
        });
        assert_eq!(row.date_label, "2004-13-45");
        assert_eq!(row.status_label, "En attente");
    }

    #[test]
    fn encodes_like_encode_uri() {
        assert_eq!(
            encode_uri("https://test.storage.tld/v0/b/a…b.jpg?alt=media&token=1"),
            "https://test.storage.tld/v0/b/a%E2%80%A6b.jpg?alt=media&token=1"
        );
        assert_eq!(encode_uri("https://x/a b.png"), "https://x/a%20b.png");
        assert_eq!(encode_uri("https://x/#frag;a=1,2"), "https://x/#frag;a=1,2");
    }

    #[test]
    fn prepared_bills_are_sorted_latest_first() {
        let raw = ["2002-02-02", "2004-04-04", "bad", "2001-01-01"]
            .iter()
            .map(|date| Bill {
                date: date.to_string(),
                ..Bill::default()
            })
            .collect();
        let dates: Vec<String> = prepare_bills(raw)
            .iter()
            .map(|b| b.raw_date().to_string())
            .collect();
        assert_eq!(dates, ["bad", "2004-04-04", "2002-02-02", "2001-01-01"]);
    }
}
