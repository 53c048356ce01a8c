// ============================================================================
// NEW BILL VIEW - Formulario "Envoyer une note de frais"
// ============================================================================

use crate::dom::Markup;
use crate::models::Session;
use crate::utils::constants::{DEFAULT_PCT, EXPENSE_TYPES};
use crate::views::layout::{render_content_header, render_page};

fn field(label: &str, input: Markup) -> Markup {
    Markup::new("div")
        .class("col-half")
        .child(Markup::new("label").class("bold-label").text(label))
        .child(input)
}

fn input(test_id: &str, input_type: &str, placeholder: &str) -> Markup {
    Markup::new("input")
        .attr("type", input_type)
        .class("form-control blue-border")
        .test_id(test_id)
        .attr("placeholder", placeholder)
}

fn render_expense_type_select() -> Markup {
    Markup::new("select")
        .class("form-control blue-border")
        .test_id("expense-type")
        .attr("required", "")
        .children(
            EXPENSE_TYPES
                .iter()
                .map(|t| Markup::new("option").attr("value", t).text(t)),
        )
}

fn render_form() -> Markup {
    let left = Markup::new("div")
        .class("col-md-6")
        .child(field("Type de dépense", render_expense_type_select()))
        .child(field("Nom de la dépense", input("expense-name", "text", "Vol Paris Londres")))
        .child(field(
            "Date",
            input("datepicker", "date", "").attr("required", ""),
        ))
        .child(field(
            "Montant TTC",
            input("amount", "number", "348").attr("required", ""),
        ))
        .child(
            Markup::new("div")
                .class("col-half-row")
                .child(field("TVA", input("vat", "number", "70")))
                .child(field("%", input("pct", "number", &DEFAULT_PCT.to_string()).attr("required", ""))),
        );

    let right = Markup::new("div")
        .class("col-md-6")
        .child(field(
            "Commentaire",
            Markup::new("textarea")
                .class("form-control blue-border")
                .test_id("commentary")
                .attr("rows", "3"),
        ))
        .child(field(
            "Justificatif",
            input("file", "file", "")
                .attr("accept", ".jpg,.jpeg,.png")
                .attr("required", ""),
        ))
        .child(
            Markup::new("span")
                .class("file-error")
                .test_id("file-error"),
        );

    Markup::new("form")
        .test_id("form-new-bill")
        .child(Markup::new("div").class("row").child(left).child(right))
        .child(
            Markup::new("div").class("row").child(
                Markup::new("button")
                    .attr("type", "submit")
                    .id("btn-send-bill")
                    .test_id("submit")
                    .class("btn btn-primary")
                    .text("Envoyer"),
            ),
        )
}

pub fn render_new_bill(session: Option<&Session>) -> Markup {
    let content = Markup::new("div")
        .class("content")
        .child(render_content_header("Envoyer une note de frais"))
        .child(Markup::new("div").class("form-newbill-container content-inner").child(render_form()));
    render_page(session, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_exposes_every_field_hook() {
        let page = render_new_bill(None);
        for test_id in [
            "expense-type",
            "expense-name",
            "datepicker",
            "amount",
            "vat",
            "pct",
            "commentary",
            "file",
            "submit",
        ] {
            assert!(page.find_by_test_id(test_id).is_some(), "missing {}", test_id);
        }
    }

    #[test]
    fn select_lists_all_expense_types() {
        let page = render_new_bill(None);
        let select = page.find_by_test_id("expense-type").unwrap();
        assert_eq!(select.element_children().count(), EXPENSE_TYPES.len());
    }
}
