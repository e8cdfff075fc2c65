mod attribute;
pub mod attributes;
mod color;
mod computed_style;
mod keywords;
mod layout_state;
mod sheet;
mod style_value;
pub mod unit;

pub use attribute::*;
pub use color::*;
pub use computed_style::*;
pub use keywords::*;
pub use layout_state::*;
pub use sheet::*;
pub use style_value::*;
pub use unit::{Length, LengthContext, Unit, resolve_length, try_get_number};
