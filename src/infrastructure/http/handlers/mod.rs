//! HTTP Handlers

mod health;
mod tts;
mod ui;
mod voice;

pub use health::*;
pub use tts::*;
pub use ui::*;
pub use voice::*;
