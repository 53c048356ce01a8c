// ============================================================================
// BILLS VIEW - Lista de notas de gastos del empleado + modal del justificante
// ============================================================================

use crate::dom::Markup;
use crate::models::{DisplayBill, Session};
use crate::views::layout::render_page;

fn render_row(bill: &DisplayBill) -> Markup {
    Markup::new("tr")
        .child(Markup::new("td").text(&bill.bill.expense_type))
        .child(Markup::new("td").text(&bill.bill.name))
        .child(Markup::new("td").text(&bill.date_label))
        .child(Markup::new("td").text(&format!("{} €", bill.bill.amount)))
        .child(Markup::new("td").text(&bill.status_label))
        .child(
            Markup::new("td").child(
                Markup::new("div").class("icon-actions").child(
                    Markup::new("div")
                        .id("eye")
                        .test_id("icon-eye")
                        .attr("data-bill-url", &bill.bill.file_url)
                        .child(Markup::new("span").class("icon icon-eye")),
                ),
            ),
        )
}

fn render_table(bills: &[DisplayBill]) -> Markup {
    let header = ["Type", "Nom", "Date", "Montant", "Statut", "Actions"]
        .into_iter()
        .map(|title| Markup::new("th").text(title));

    Markup::new("div").id("data-table").child(
        Markup::new("table")
            .id("example")
            .class("table table-striped")
            .child(Markup::new("thead").child(Markup::new("tr").children(header)))
            .child(
                Markup::new("tbody")
                    .test_id("tbody")
                    .children(bills.iter().map(render_row)),
            ),
    )
}

/// Modal del justificante; el src de la imagen se rellena al hacer click en el ojo
fn render_receipt_modal() -> Markup {
    Markup::new("div")
        .class("modal fade")
        .id("modaleFile")
        .test_id("modaleFileEmployee")
        .attr("role", "dialog")
        .child(
            Markup::new("div")
                .class("modal-dialog modal-dialog-centered modal-lg")
                .child(
                    Markup::new("div")
                        .class("modal-content")
                        .child(
                            Markup::new("div")
                                .class("modal-header")
                                .child(Markup::new("h5").class("modal-title").text("Justificatif"))
                                .child(
                                    Markup::new("button")
                                        .class("close")
                                        .test_id("modal-close")
                                        .attr("type", "button")
                                        .text("×"),
                                ),
                        )
                        .child(
                            Markup::new("div").class("modal-body").child(
                                Markup::new("div")
                                    .class("bill-proof-container")
                                    .child(Markup::new("img").attr("alt", "Bill").attr("src", "")),
                            ),
                        ),
                ),
        )
}

/// Renderizar página "Mes notes de frais"
pub fn render_bills(session: Option<&Session>, bills: &[DisplayBill]) -> Markup {
    let content = Markup::new("div")
        .class("content")
        .child(
            Markup::new("div")
                .class("content-header")
                .child(Markup::new("div").class("content-title").text("Mes notes de frais"))
                .child(
                    Markup::new("button")
                        .attr("type", "button")
                        .test_id("btn-new-bill")
                        .class("btn btn-primary")
                        .text("Nouvelle note de frais"),
                ),
        )
        .child(render_table(bills));

    render_page(session, content).child(render_receipt_modal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_display_bills;

    #[test]
    fn renders_one_eye_icon_per_bill() {
        let bills = fixture_display_bills();
        let page = render_bills(None, &bills);
        let tbody = page.find_by_test_id("tbody").unwrap();
        assert_eq!(tbody.element_children().count(), bills.len());

        let eyes = page.find_all_by_test_id("icon-eye");
        assert_eq!(eyes.len(), bills.len());
        assert_eq!(eyes[0].attribute("data-bill-url"), Some(bills[0].bill.file_url.as_str()));
    }

    #[test]
    fn shows_formatted_labels() {
        let bills = fixture_display_bills();
        let page = render_bills(None, &bills);
        assert!(page.get_by_text("Mes notes de frais").is_some());
        assert!(page.get_by_text(&bills[0].date_label).is_some());
        assert!(page.get_by_text("400 €").is_some());
        assert!(page.get_by_text("En attente").is_some());
    }

    #[test]
    fn modal_starts_hidden() {
        let page = render_bills(None, &[]);
        let modal = page.find_by_test_id("modaleFileEmployee").unwrap();
        assert!(!modal.has_class("show"));
        assert!(modal.find_by_tag("img").is_some());
    }
}
