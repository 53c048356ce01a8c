// ============================================================================
// VERTICAL LAYOUT - Barra lateral común a todas las páginas conectadas
// ============================================================================

use crate::dom::Markup;
use crate::models::Session;

/// Barra lateral: iconos de navegación solo para empleados
pub fn render_vertical_layout(session: Option<&Session>) -> Markup {
    let mut nav = Markup::new("div")
        .class("vertical-navbar")
        .child(Markup::new("div").class("layout-title").text("Billed"));

    if session.map(Session::is_employee).unwrap_or(false) {
        nav = nav
            .child(
                Markup::new("div")
                    .id("layout-icon1")
                    .test_id("icon-window")
                    .class("layout-icon")
                    .child(Markup::new("span").class("icon icon-window")),
            )
            .child(
                Markup::new("div")
                    .id("layout-icon2")
                    .test_id("icon-mail")
                    .class("layout-icon")
                    .child(Markup::new("span").class("icon icon-mail")),
            );
    }

    if session.is_some() {
        nav = nav.child(
            Markup::new("div")
                .id("layout-disconnect")
                .test_id("layout-disconnect")
                .class("layout-icon")
                .child(Markup::new("span").class("icon icon-disconnect")),
        );
    }

    nav
}

/// Página completa: layout + contenido
pub fn render_page(session: Option<&Session>, content: Markup) -> Markup {
    Markup::new("div")
        .class("layout")
        .child(render_vertical_layout(session))
        .child(content)
}

/// Cabecera estándar de contenido
pub fn render_content_header(title: &str) -> Markup {
    Markup::new("div")
        .class("content-header")
        .child(Markup::new("div").class("content-title").text(title))
}
