//! Retained-mode UI layout and styling core.
//!
//! Styles are string attribute maps resolved through an
//! [`AttributeRegistry`](style::AttributeRegistry) into typed computed
//! fields. Elements live in a [`UiTree`](view::UiTree) arena and are laid out
//! lazily by flex, grid or free calculators. [`UiManager`](ui::UiManager)
//! drives a frame: input, style sync, layout, then draw submission.

pub mod error;
pub mod style;
pub mod transition;
pub mod ui;
pub mod view;

pub use error::{ParseError, UiError};
pub use style::{AttributeRegistry, SharedStyle, Style, UiState};
pub use ui::{UiConfig, UiManager};
pub use view::{ElementId, ElementType, ElementTypeRegistry, UiTree};
