pub mod session_service;
pub mod store;
pub mod tasks;
#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use session_service::SessionService;
pub use store::{BillsResource, Store};
pub use tasks::TaskSpawner;
#[cfg(target_arch = "wasm32")]
pub use api_client::{ApiClient, RestStore};
#[cfg(target_arch = "wasm32")]
pub use tasks::WasmSpawner;
