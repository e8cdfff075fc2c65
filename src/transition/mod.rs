mod color_transition;
mod time_function;

pub use color_transition::*;
pub use time_function::*;
