pub mod bills_viewmodel;
pub mod dashboard_viewmodel;
pub mod login_viewmodel;
pub mod new_bill_viewmodel;

pub use bills_viewmodel::BillsViewModel;
pub use dashboard_viewmodel::DashboardViewModel;
pub use login_viewmodel::LoginViewModel;
pub use new_bill_viewmodel::NewBillViewModel;
