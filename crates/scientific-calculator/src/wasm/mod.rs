//! WASM Frontend for Calculator
//!
//! The mock DOM and [`WasmDriver`] are always compiled so the browser wiring
//! is testable natively; the real bindings need the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, DocumentDisplay, LocalStorage};
pub use dom::{DomElement, DomEvent, MockDom, HISTORY_LIST_ID};
pub use driver::WasmDriver;
