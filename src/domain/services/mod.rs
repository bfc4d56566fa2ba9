mod app_state;
mod busy;
mod conversation;
mod dispatcher;
mod history;
mod language;
#[cfg(test)]
pub(crate) mod testing;

pub use app_state::*;
pub use busy::*;
pub use conversation::*;
pub use dispatcher::*;
pub use history::*;
pub use language::*;
