pub mod bills;
pub mod dashboard;
pub mod error_page;
pub mod layout;
pub mod loading_page;
pub mod login;
pub mod new_bill;

pub use bills::render_bills;
pub use dashboard::{filter_bills, render_dashboard};
pub use error_page::render_error_page;
pub use layout::{render_page, render_vertical_layout};
pub use loading_page::render_loading_page;
pub use login::render_login;
pub use new_bill::render_new_bill;
