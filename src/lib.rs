//! Startup commandline parsing for a multi-pane terminal.
//!
//! A launch like `wt.exe new-tab -p work ; split-pane -H ; focus-tab -t 0`
//! is split at every unescaped `;`, each command is matched against the
//! `new-tab`/`split-pane`/`focus-tab` grammar, and the resulting actions are
//! queued for the host to execute in order.

mod actions;
mod error;
mod parse;
mod startup;

pub use actions::{build_action, join_commandline, Action, NewTerminalArgs, SplitState};
pub use error::{Diagnostic, ErrorKind, STATUS_CONFIG, STATUS_OK};
pub use parse::{
    CommandParser, Commandline, ParseState, SubCommand, COMMAND_DELIMITER, DELIMITER_ESCAPE,
    NIX_HELP_FLAG, PROGRAM_NAME, WINDOWS_HELP_FLAG,
};
pub use startup::{ensure_leading_new_tab, StartupSession};

/// Split the arguments after the program name into delimited commandlines.
pub fn build_commands<I, S>(args: I) -> Vec<Commandline>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse::build_commands(args)
}

/// Fuzz helper for parser-only targets.
pub fn fuzz_parse_bytes(data: &[u8]) {
    let input = String::from_utf8_lossy(data);
    let mut session = StartupSession::new();
    for command in build_commands(input.split_whitespace()) {
        let _ = session.parse_command(&command);
    }
    session.validate_startup_commands();
}
