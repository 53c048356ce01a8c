// ============================================================================
// LOGIN VIEW - Formularios empleado / administrador
// ============================================================================

use crate::dom::Markup;
use crate::models::UserType;

fn prefix(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Employee => "employee",
        UserType::Admin => "admin",
    }
}

fn render_login_form(user_type: UserType, title: &str) -> Markup {
    let prefix = prefix(user_type);
    let email = Markup::new("div")
        .class("form-group")
        .child(Markup::new("label").class("bold-label").text("Votre email"))
        .child(
            Markup::new("input")
                .attr("type", "email")
                .test_id(&format!("{}-email-input", prefix))
                .class("form-control")
                .attr("placeholder", "johndoe@email.com")
                .attr("required", ""),
        );
    let password = Markup::new("div")
        .class("form-group")
        .child(Markup::new("label").class("bold-label").text("Mot de passe"))
        .child(
            Markup::new("input")
                .attr("type", "password")
                .test_id(&format!("{}-password-input", prefix))
                .class("form-control")
                .attr("placeholder", "******")
                .attr("required", ""),
        );

    Markup::new("div")
        .class("col-sm")
        .child(Markup::new("h2").text(title))
        .child(
            Markup::new("form")
                .test_id(&format!("form-{}", prefix))
                .child(email)
                .child(password)
                .child(
                    Markup::new("button")
                        .attr("type", "submit")
                        .class("btn btn-primary")
                        .test_id(&format!("{}-login-button", prefix))
                        .text("Se connecter"),
                ),
        )
}

pub fn render_login() -> Markup {
    Markup::new("div")
        .class("login-page")
        .child(Markup::new("h1").class("login-title").text("Billed"))
        .child(
            Markup::new("div")
                .class("row")
                .child(render_login_form(UserType::Employee, "Employé"))
                .child(render_login_form(UserType::Admin, "Administration")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_forms_are_present() {
        let page = render_login();
        for test_id in [
            "form-employee",
            "employee-email-input",
            "employee-password-input",
            "form-admin",
            "admin-email-input",
            "admin-password-input",
        ] {
            assert!(page.find_by_test_id(test_id).is_some(), "missing {}", test_id);
        }
    }
}
