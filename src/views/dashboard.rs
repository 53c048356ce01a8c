// ============================================================================
// DASHBOARD VIEW - Validación de notas de gastos (administrador)
// ============================================================================

use crate::dom::Markup;
use crate::models::{BillStatus, DisplayBill, Session};
use crate::utils::format::format_status;
use crate::views::layout::{render_content_header, render_page};

/// Notas de una columna de estado
pub fn filter_bills(bills: &[DisplayBill], status: BillStatus) -> Vec<&DisplayBill> {
    bills.iter().filter(|b| b.bill.status == status).collect()
}

fn render_card(bill: &DisplayBill, selected: bool) -> Markup {
    let class = if selected { "bill-card bill-card-selected" } else { "bill-card" };
    Markup::new("div")
        .class(class)
        .test_id("open-bill")
        .attr("data-bill-id", &bill.bill.id)
        .child(
            Markup::new("div")
                .class("bill-card-name-container")
                .child(Markup::new("div").class("bill-card-grey").text(&bill.bill.email))
                .child(Markup::new("span").class("bill-card-name").text(&bill.bill.name)),
        )
        .child(
            Markup::new("div")
                .class("date-type-container")
                .child(Markup::new("span").text(&bill.date_label))
                .child(Markup::new("span").text(&bill.bill.expense_type))
                .child(Markup::new("span").class("bill-card-amount").text(&format!("{} €", bill.bill.amount))),
        )
}

fn render_status_column(bills: &[DisplayBill], status: BillStatus, selected: Option<&str>) -> Markup {
    let column = filter_bills(bills, status);
    Markup::new("div")
        .class("status-bills-container")
        .test_id(&format!("status-bills-{}", status.as_str()))
        .child(
            Markup::new("div")
                .class("status-bills-header")
                .text(&format!("{} ({})", format_status(status), column.len())),
        )
        .children(
            column
                .into_iter()
                .map(|b| render_card(b, selected == Some(b.bill.id.as_str()))),
        )
}

/// Formulario de revisión de la nota abierta
fn render_review_form(bill: &DisplayBill) -> Markup {
    let detail = |label: &str, value: &str| {
        Markup::new("div")
            .class("input-field")
            .child(Markup::new("label").class("bold-label").text(label))
            .child(Markup::new("span").text(value))
    };

    let mut form = Markup::new("div")
        .class("dashboard-form")
        .test_id("dashboard-form")
        .child(detail("Type de dépense", &bill.bill.expense_type))
        .child(detail("Nom de la dépense", &bill.bill.name))
        .child(detail("Date", &bill.date_label))
        .child(detail("Montant TTC", &format!("{} €", bill.bill.amount)))
        .child(detail("TVA", &format!("{} ({} %)", bill.bill.vat, bill.bill.pct)))
        .child(detail("Commentaire", &bill.bill.commentary))
        .child(
            Markup::new("a")
                .attr("href", &bill.bill.file_url)
                .attr("target", "_blank")
                .test_id("file-link")
                .text(&bill.bill.file_name),
        );

    if bill.bill.status == BillStatus::Pending {
        form = form
            .child(
                Markup::new("textarea")
                    .class("form-control blue-border")
                    .test_id("commentary2")
                    .attr("rows", "5"),
            )
            .child(
                Markup::new("div")
                    .class("buttons-flex")
                    .child(
                        Markup::new("button")
                            .attr("type", "button")
                            .class("btn btn-primary")
                            .test_id("btn-refuse-bill")
                            .text("Refuser"),
                    )
                    .child(
                        Markup::new("button")
                            .attr("type", "button")
                            .class("btn btn-primary")
                            .test_id("btn-accept-bill")
                            .text("Accepter"),
                    ),
            );
    } else {
        form = form.child(detail("Commentaire admin", &bill.bill.comment_admin));
    }

    form
}

/// Renderizar dashboard; `selected` = id de la nota abierta
pub fn render_dashboard(session: Option<&Session>, bills: &[DisplayBill], selected: Option<&str>) -> Markup {
    let columns = Markup::new("div")
        .class("dashboard-left-container")
        .children(
            BillStatus::ALL
                .into_iter()
                .map(|status| render_status_column(bills, status, selected)),
        );

    let right = match selected.and_then(|id| bills.iter().find(|b| b.bill.id == id)) {
        Some(bill) => render_review_form(bill),
        None => Markup::new("div")
            .class("dashboard-right-container")
            .test_id("big-billed-icon")
            .child(Markup::new("span").class("icon big-billed-icon")),
    };

    let content = Markup::new("div")
        .class("content")
        .child(render_content_header("Validations"))
        .child(Markup::new("div").class("dashboard-content").child(columns).child(right));

    render_page(session, content)
}
