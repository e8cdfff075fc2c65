mod button;
mod panel;
mod register;
mod text;
mod theme;

pub use button::*;
pub use panel::*;
pub use register::*;
pub use text::*;
pub use theme::*;
