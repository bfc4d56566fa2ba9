mod backend;
mod error;
mod event;
mod history;
mod language;
mod message;
mod request;
mod sender;
mod slash_commands;

pub use backend::*;
pub use error::*;
pub use event::*;
pub use history::*;
pub use language::*;
pub use message::*;
pub use request::*;
pub use sender::*;
pub use slash_commands::*;
