//! Startup actions and the step that builds them from parsed commandline state.
//!
//! An [`Action`] is what the host session executes at startup. Building one is
//! kept apart from the grammar: the parser only fills a [`ParseState`], and
//! [`build_action`] turns a satisfied state into at most one action.
use std::fmt;

use crate::parse::{ParseState, SubCommand};

/// Profile, directory and commandline overrides for a new terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTerminalArgs {
    pub profile: Option<String>,
    pub starting_directory: Option<String>,
    pub commandline: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitState {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NewTab(NewTerminalArgs),
    SplitPane {
        terminal_args: NewTerminalArgs,
        style: SplitState,
    },
    SwitchToTab {
        index: u32,
    },
    NextTab,
    PrevTab,
}

impl Action {
    /// A `NewTab` with no overrides, as used when the queue needs a first tab.
    pub fn default_new_tab() -> Self {
        Action::NewTab(NewTerminalArgs::default())
    }

    pub fn is_new_tab(&self) -> bool {
        matches!(self, Action::NewTab(_))
    }
}

/// Translate the state of a matched sub-command into its action.
///
/// Returns `None` only for `focus-tab` without a target, `--next` or
/// `--previous`, which is accepted and does nothing.
pub fn build_action(command: SubCommand, state: &ParseState) -> Option<Action> {
    match command {
        SubCommand::NewTab => Some(Action::NewTab(new_terminal_args(state))),
        SubCommand::SplitPane => {
            let style = if state.split_horizontal {
                SplitState::Horizontal
            } else {
                SplitState::Vertical
            };
            Some(Action::SplitPane {
                terminal_args: new_terminal_args(state),
                style,
            })
        }
        SubCommand::FocusTab => {
            if let Some(index) = state.focus_tab_index {
                Some(Action::SwitchToTab { index })
            } else if state.focus_next_tab {
                Some(Action::NextTab)
            } else if state.focus_prev_tab {
                Some(Action::PrevTab)
            } else {
                None
            }
        }
    }
}

fn new_terminal_args(state: &ParseState) -> NewTerminalArgs {
    NewTerminalArgs {
        profile: non_empty(&state.profile_name),
        starting_directory: non_empty(&state.starting_directory),
        commandline: if state.commandline.is_empty() {
            None
        } else {
            Some(join_commandline(&state.commandline))
        },
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Join trailing tokens with single spaces, quoting any token with whitespace.
pub fn join_commandline(args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        if arg.chars().any(char::is_whitespace) {
            parts.push(format!("\"{arg}\""));
        } else {
            parts.push(arg.clone());
        }
    }
    parts.join(" ")
}

impl fmt::Display for NewTerminalArgs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(profile) = &self.profile {
            write!(f, " --profile {}", quote_value(profile))?;
        }
        if let Some(dir) = &self.starting_directory {
            write!(f, " --startingDirectory {}", quote_value(dir))?;
        }
        if let Some(commandline) = &self.commandline {
            write!(f, " -- {commandline}")?;
        }
        Ok(())
    }
}

/// Canonical command form, e.g. `split-pane --horizontal --profile work`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::NewTab(args) => write!(f, "new-tab{args}"),
            Action::SplitPane {
                terminal_args,
                style,
            } => {
                let flag = match style {
                    SplitState::Horizontal => "--horizontal",
                    SplitState::Vertical => "--vertical",
                };
                write!(f, "split-pane {flag}{terminal_args}")
            }
            Action::SwitchToTab { index } => write!(f, "focus-tab --target {index}"),
            Action::NextTab => write!(f, "focus-tab --next"),
            Action::PrevTab => write!(f, "focus-tab --previous"),
        }
    }
}

fn quote_value(value: &str) -> String {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
