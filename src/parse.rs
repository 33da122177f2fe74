//! Commandline splitting and parsing.
//!
//! - `splitter` breaks the flat argument list into one [`Commandline`] per
//!   chained command, at every unescaped [`COMMAND_DELIMITER`].
//! - `grammar` declares the sub-commands and their options.
//! - `command_parser` matches one commandline against the grammar and hands
//!   the resulting [`ParseState`] to the action builder.

/// Separates chained commands: `new-tab ; split-pane -H`.
pub const COMMAND_DELIMITER: char = ';';
/// Makes the following delimiter literal: `echo a\;b`.
pub const DELIMITER_ESCAPE: char = '\\';
/// Synthetic first argument of every split commandline.
pub const PROGRAM_NAME: &str = "wt.exe";
pub const NIX_HELP_FLAG: &str = "-?";
pub const WINDOWS_HELP_FLAG: &str = "/?";

mod command_parser;
mod grammar;
mod splitter;

pub use command_parser::{CommandParser, ParseState};
pub use grammar::SubCommand;
pub use splitter::build_commands;

/// The arguments of one logical command, program name first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commandline {
    args: Vec<String>,
}

impl Commandline {
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// A commandline holding only the synthetic program name.
    pub fn with_program_name() -> Self {
        Self {
            args: vec![PROGRAM_NAME.to_string()],
        }
    }

    pub fn add_arg(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    pub fn argc(&self) -> usize {
        self.args.len()
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl<S: Into<String>> FromIterator<S> for Commandline {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().map(Into::into).collect(),
        }
    }
}
