mod element;
mod element_type;
pub mod layout;
mod tree;

pub use element::*;
pub use element_type::*;
pub use tree::*;
