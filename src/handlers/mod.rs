mod callback;
mod command;
mod progress;

pub use callback::*;
pub use command::*;
pub use progress::*;

/// What the front-end should print, and whether to stop reading input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: false }
    }

    pub fn quit(text: impl Into<String>) -> Self {
        Self { text: text.into(), quit: true }
    }
}
