//! Splits a flat argument list into chained commandlines.
//!
//! Each argument is scanned character by character. An unescaped
//! [`COMMAND_DELIMITER`] ends the current commandline and starts a new one,
//! even in the middle of an argument, so `new-tab;split-pane` is two commands.
//! A delimiter preceded by [`DELIMITER_ESCAPE`] is kept literally and the
//! escape character is dropped; every other backslash is left alone so paths
//! like `C:\work` survive untouched.
use log::debug;

use crate::parse::{Commandline, COMMAND_DELIMITER, DELIMITER_ESCAPE};

/// Build one [`Commandline`] per delimited command.
///
/// `args` are the arguments after the program name. Every returned
/// commandline starts with the synthetic program name, so the result is never
/// empty: no arguments yield a single commandline holding just that name.
pub fn build_commands<I, S>(args: I) -> Vec<Commandline>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut commands = vec![Commandline::with_program_name()];
    for arg in args {
        add_commands_for_arg(&mut commands, arg.as_ref());
    }
    debug!("split event=done commands={}", commands.len());
    commands
}

fn add_commands_for_arg(commands: &mut Vec<Commandline>, arg: &str) {
    let mut buf = String::new();
    let mut pending_escape = false;
    let mut split_any = false;

    for ch in arg.chars() {
        match ch {
            DELIMITER_ESCAPE => {
                if pending_escape {
                    buf.push(DELIMITER_ESCAPE);
                }
                pending_escape = true;
            }
            COMMAND_DELIMITER if pending_escape => {
                pending_escape = false;
                buf.push(COMMAND_DELIMITER);
            }
            COMMAND_DELIMITER => {
                // A delimiter at the start of the argument leaves nothing behind.
                if !buf.is_empty() {
                    current(commands).add_arg(std::mem::take(&mut buf));
                }
                commands.push(Commandline::with_program_name());
                split_any = true;
            }
            _ => {
                if pending_escape {
                    buf.push(DELIMITER_ESCAPE);
                    pending_escape = false;
                }
                buf.push(ch);
            }
        }
    }
    if pending_escape {
        buf.push(DELIMITER_ESCAPE);
    }

    // Arguments without a delimiter are kept verbatim, even when empty.
    if !buf.is_empty() || !split_any {
        current(commands).add_arg(buf);
    }
}

fn current(commands: &mut Vec<Commandline>) -> &mut Commandline {
    if commands.is_empty() {
        commands.push(Commandline::with_program_name());
    }
    let last = commands.len() - 1;
    &mut commands[last]
}
