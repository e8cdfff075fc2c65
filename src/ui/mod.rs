mod config;
mod event;
mod input;
mod manager;
mod render_backend;

pub use config::*;
pub use event::*;
pub use input::*;
pub use manager::*;
pub use render_backend::*;
