pub mod bill;
pub mod user;

pub use bill::{Bill, BillDraft, BillStatus, CreatedFile, DisplayBill, ReceiptFile};
pub use user::{Credentials, LoginResponse, NewUser, Session, UserType};
