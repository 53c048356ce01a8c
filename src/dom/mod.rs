// ============================================================================
// DOM MODULE - Markup puro + adaptadores del punto de montaje
// ============================================================================

pub mod document;
pub mod markup;
#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
pub mod events;

pub use document::{Document, EventKind, Handler, VirtualDocument};
pub use markup::{Markup, Node};
#[cfg(target_arch = "wasm32")]
pub use browser::BrowserDocument;
