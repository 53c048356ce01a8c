use crate::dom::Markup;
use crate::error::{StoreError, ERROR_TITLE};
use crate::models::Session;
use crate::views::layout::{render_content_header, render_page};

/// Vista de error genérica: siempre "Erreur", el detalle debajo
pub fn render_error_page(session: Option<&Session>, error: Option<&StoreError>) -> Markup {
    let detail = error.map(StoreError::message).unwrap_or_default();
    let content = Markup::new("div")
        .class("content")
        .test_id("error-message")
        .child(render_content_header(ERROR_TITLE))
        .child(Markup::new("div").class("error-detail").text(detail));
    render_page(session, content)
}
