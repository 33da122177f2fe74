//! Declarative grammar for the startup sub-commands.
//!
//! The grammar is a plain clap command tree and holds no parse state, so one
//! instance can be cloned and matched any number of times.
use clap::{value_parser, Arg, ArgAction, Command};

use crate::parse::PROGRAM_NAME;

pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_STARTING_DIRECTORY: &str = "startingDirectory";
pub(crate) const ARG_COMMANDLINE: &str = "cmdline";
pub(crate) const ARG_HORIZONTAL: &str = "horizontal";
pub(crate) const ARG_VERTICAL: &str = "vertical";
pub(crate) const ARG_TARGET: &str = "target";
pub(crate) const ARG_NEXT: &str = "next";
pub(crate) const ARG_PREVIOUS: &str = "previous";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCommand {
    NewTab,
    SplitPane,
    FocusTab,
}

impl SubCommand {
    pub const ALL: [SubCommand; 3] = [SubCommand::NewTab, SubCommand::SplitPane, SubCommand::FocusTab];

    pub fn name(self) -> &'static str {
        match self {
            SubCommand::NewTab => "new-tab",
            SubCommand::SplitPane => "split-pane",
            SubCommand::FocusTab => "focus-tab",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }
}

/// Root command with every sub-command attached.
pub(crate) fn build_app() -> Command {
    Command::new(PROGRAM_NAME)
        .about("Open tabs and panes at startup. Chain commands with ';', escape it as '\\;'.")
        .disable_help_subcommand(true)
        .subcommand(new_tab_command())
        .subcommand(split_pane_command())
        .subcommand(focus_tab_command())
}

pub(crate) fn new_tab_command() -> Command {
    add_new_terminal_args(Command::new(SubCommand::NewTab.name()).about("Create a new tab"))
}

fn split_pane_command() -> Command {
    add_new_terminal_args(
        Command::new(SubCommand::SplitPane.name()).about("Create a new pane by splitting the focused one"),
    )
    .arg(
        Arg::new(ARG_HORIZONTAL)
            .short('H')
            .long("horizontal")
            .action(ArgAction::SetTrue)
            .conflicts_with(ARG_VERTICAL)
            .help("Create the new pane as a horizontal split"),
    )
    .arg(
        Arg::new(ARG_VERTICAL)
            .short('V')
            .long("vertical")
            .action(ArgAction::SetTrue)
            .help("Create the new pane as a vertical split (default)"),
    )
}

fn focus_tab_command() -> Command {
    Command::new(SubCommand::FocusTab.name())
        .about("Move focus to another tab")
        .arg(
            Arg::new(ARG_TARGET)
                .short('t')
                .long("target")
                .value_name("INDEX")
                .value_parser(value_parser!(u32))
                .conflicts_with_all([ARG_NEXT, ARG_PREVIOUS])
                .help("Move focus to the tab at the given index"),
        )
        .arg(
            Arg::new(ARG_NEXT)
                .short('n')
                .long("next")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARG_PREVIOUS)
                .help("Move focus to the next tab"),
        )
        .arg(
            Arg::new(ARG_PREVIOUS)
                .short('p')
                .long("previous")
                .action(ArgAction::SetTrue)
                .help("Move focus to the previous tab"),
        )
}

/// Options shared by every command that opens a terminal.
fn add_new_terminal_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PROFILE)
                .short('p')
                .long("profile")
                .value_name("NAME")
                .help("Open with the given profile. Accepts either the name or guid of a profile"),
        )
        .arg(
            Arg::new(ARG_STARTING_DIRECTORY)
                .short('d')
                .long("startingDirectory")
                .value_name("PATH")
                .help("Open in the given directory instead of the profile's starting directory"),
        )
        .arg(
            Arg::new(ARG_COMMANDLINE)
                .value_name("CMDLINE")
                .num_args(1..)
                .trailing_var_arg(true)
                .help("Commandline to run in the given profile"),
        )
}
