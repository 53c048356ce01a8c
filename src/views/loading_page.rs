use crate::dom::Markup;
use crate::models::Session;
use crate::views::layout::render_page;

pub fn render_loading_page(session: Option<&Session>) -> Markup {
    render_page(
        session,
        Markup::new("div")
            .class("content")
            .id("loading")
            .test_id("loading")
            .text("Loading..."),
    )
}
