use clap::error::ErrorKind as ClapErrorKind;
use clap::{ArgMatches, Command};
use log::debug;

use crate::actions::{build_action, Action};
use crate::error::{Diagnostic, ErrorKind};
use crate::parse::grammar::{
    build_app, new_tab_command, SubCommand, ARG_COMMANDLINE, ARG_HORIZONTAL, ARG_NEXT,
    ARG_PREVIOUS, ARG_PROFILE, ARG_STARTING_DIRECTORY, ARG_TARGET, ARG_VERTICAL,
};
use crate::parse::{Commandline, NIX_HELP_FLAG, WINDOWS_HELP_FLAG};

/// Values gathered while matching a single commandline.
///
/// A fresh default value is built for every parse, so nothing set by one
/// command is visible to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub profile_name: Option<String>,
    pub starting_directory: Option<String>,
    pub commandline: Vec<String>,
    pub split_horizontal: bool,
    pub split_vertical: bool,
    pub focus_tab_index: Option<u32>,
    pub focus_next_tab: bool,
    pub focus_prev_tab: bool,
}

impl ParseState {
    fn from_matches(command: SubCommand, matches: &ArgMatches) -> Self {
        let mut state = ParseState::default();
        match command {
            SubCommand::NewTab | SubCommand::SplitPane => {
                state.profile_name = matches.get_one::<String>(ARG_PROFILE).cloned();
                state.starting_directory =
                    matches.get_one::<String>(ARG_STARTING_DIRECTORY).cloned();
                state.commandline = matches
                    .get_many::<String>(ARG_COMMANDLINE)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                if command == SubCommand::SplitPane {
                    state.split_horizontal = matches.get_flag(ARG_HORIZONTAL);
                    state.split_vertical = matches.get_flag(ARG_VERTICAL);
                }
            }
            SubCommand::FocusTab => {
                state.focus_tab_index = matches.get_one::<u32>(ARG_TARGET).copied();
                state.focus_next_tab = matches.get_flag(ARG_NEXT);
                state.focus_prev_tab = matches.get_flag(ARG_PREVIOUS);
            }
        }
        state
    }
}

/// Matches commandlines against the startup grammar.
///
/// The parser only holds the grammar; every call works on its own copy and
/// its own [`ParseState`], so the same parser can be reused for each command
/// of a chain.
#[derive(Debug, Clone)]
pub struct CommandParser {
    app: Command,
    new_tab: Command,
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            app: build_app(),
            new_tab: new_tab_command(),
        }
    }

    /// Parse one commandline into at most one action.
    ///
    /// `Ok(None)` means the command was valid but has nothing to do. Help
    /// requests come back as a [`Diagnostic`] with status 0.
    pub fn parse(&self, command: &Commandline) -> Result<Option<Action>, Diagnostic> {
        let (sub_command, state) = self.match_state(command)?;
        let action = build_action(sub_command, &state);
        if action.is_none() {
            debug!("parse event=noop command={}", sub_command.name());
        }
        Ok(action)
    }

    /// Match a commandline and return the sub-command with its parsed values.
    ///
    /// Commands that name no sub-command are read as an implicit `new-tab`.
    pub fn match_state(&self, command: &Commandline) -> Result<(SubCommand, ParseState), Diagnostic> {
        let argv = command.argv();
        if argv.len() == 2 && (argv[1] == NIX_HELP_FLAG || argv[1] == WINDOWS_HELP_FLAG) {
            debug!("parse event=help flag={}", argv[1]);
            return Err(Diagnostic::help(self.help_text()));
        }

        match self.app.clone().try_get_matches_from(argv) {
            Ok(matches) => match matches.subcommand() {
                Some((name, sub_matches)) => match SubCommand::from_name(name) {
                    Some(sub_command) => {
                        debug!("parse event=matched command={} argc={}", name, argv.len());
                        Ok((sub_command, ParseState::from_matches(sub_command, sub_matches)))
                    }
                    None => self.match_as_new_tab(argv),
                },
                None => self.match_as_new_tab(argv),
            },
            Err(err) if is_help(&err) => Err(Diagnostic::help(err.render().to_string())),
            Err(err) if names_sub_command(argv) => {
                debug!("parse event=error kind={:?} argc={}", err.kind(), argv.len());
                Err(grammar_diagnostic(ErrorKind::Grammar, &err))
            }
            Err(err) => {
                debug!("parse event=fallback reason={:?} argc={}", err.kind(), argv.len());
                self.match_as_new_tab(argv)
            }
        }
    }

    /// Root help text, as shown for `-?` and `/?`.
    pub fn help_text(&self) -> String {
        self.app.clone().render_help().to_string()
    }

    fn match_as_new_tab(&self, argv: &[String]) -> Result<(SubCommand, ParseState), Diagnostic> {
        match self.new_tab.clone().try_get_matches_from(argv) {
            Ok(matches) => Ok((
                SubCommand::NewTab,
                ParseState::from_matches(SubCommand::NewTab, &matches),
            )),
            Err(err) if is_help(&err) => Err(Diagnostic::help(err.render().to_string())),
            Err(err) => {
                debug!("parse event=fallback-failed kind={:?}", err.kind());
                Err(grammar_diagnostic(ErrorKind::FallbackExhausted, &err))
            }
        }
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_help(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
    )
}

/// True if any argument before `--` is a sub-command name.
fn names_sub_command(argv: &[String]) -> bool {
    argv.iter()
        .skip(1)
        .take_while(|arg| arg.as_str() != "--")
        .any(|arg| SubCommand::from_name(arg).is_some())
}

fn grammar_diagnostic(kind: ErrorKind, err: &clap::Error) -> Diagnostic {
    Diagnostic::new(kind, err.exit_code(), err.render().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{NewTerminalArgs, SplitState};
    use crate::parse::PROGRAM_NAME;

    fn cmd(args: &[&str]) -> Commandline {
        std::iter::once(PROGRAM_NAME)
            .chain(args.iter().copied())
            .collect()
    }

    fn parse(args: &[&str]) -> Result<Option<Action>, Diagnostic> {
        CommandParser::new().parse(&cmd(args))
    }

    #[test]
    fn new_tab_with_profile_and_commandline() {
        let action = parse(&["new-tab", "-p", "work", "--", "echo", "hello", "world"]).unwrap();
        assert_eq!(
            action,
            Some(Action::NewTab(NewTerminalArgs {
                profile: Some("work".to_string()),
                starting_directory: None,
                commandline: Some("echo hello world".to_string()),
            }))
        );
    }

    #[test]
    fn commandline_without_separator_takes_trailing_flags() {
        let action = parse(&["new-tab", "cmd.exe", "/k", "dir", "-x"]).unwrap();
        assert_eq!(
            action,
            Some(Action::NewTab(NewTerminalArgs {
                commandline: Some("cmd.exe /k dir -x".to_string()),
                ..NewTerminalArgs::default()
            }))
        );
    }

    #[test]
    fn long_option_names() {
        let action = parse(&[
            "split-pane",
            "--horizontal",
            "--profile",
            "ubuntu",
            "--startingDirectory",
            "/home/me",
        ])
        .unwrap();
        assert_eq!(
            action,
            Some(Action::SplitPane {
                terminal_args: NewTerminalArgs {
                    profile: Some("ubuntu".to_string()),
                    starting_directory: Some("/home/me".to_string()),
                    commandline: None,
                },
                style: SplitState::Horizontal,
            })
        );
    }

    #[test]
    fn split_pane_orientation() {
        let action = parse(&["split-pane", "-H"]).unwrap().unwrap();
        assert!(matches!(action, Action::SplitPane { style: SplitState::Horizontal, .. }));

        let action = parse(&["split-pane", "-V"]).unwrap().unwrap();
        assert!(matches!(action, Action::SplitPane { style: SplitState::Vertical, .. }));

        let action = parse(&["split-pane"]).unwrap().unwrap();
        assert!(matches!(action, Action::SplitPane { style: SplitState::Vertical, .. }));
    }

    #[test]
    fn split_pane_conflicting_orientation() {
        let diag = parse(&["split-pane", "-H", "-V"]).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::Grammar);
        assert_ne!(diag.status, 0);
        assert!(diag.message.contains("cannot be used with"), "{}", diag.message);
    }

    #[test]
    fn focus_tab_variants() {
        assert_eq!(
            parse(&["focus-tab", "-t", "2"]).unwrap(),
            Some(Action::SwitchToTab { index: 2 })
        );
        assert_eq!(parse(&["focus-tab", "--next"]).unwrap(), Some(Action::NextTab));
        assert_eq!(parse(&["focus-tab", "-p"]).unwrap(), Some(Action::PrevTab));
        assert_eq!(parse(&["focus-tab"]).unwrap(), None);
    }

    #[test]
    fn focus_tab_conflicts_and_bad_values() {
        for args in [
            &["focus-tab", "-n", "-p"][..],
            &["focus-tab", "-t", "1", "-n"][..],
            &["focus-tab", "-t", "1", "--previous"][..],
            &["focus-tab", "-t", "two"][..],
            &["focus-tab", "-t", "-1"][..],
        ] {
            let diag = parse(args).unwrap_err();
            assert_eq!(diag.kind, ErrorKind::Grammar, "{args:?}");
            assert!(diag.is_error(), "{args:?}");
        }
    }

    #[test]
    fn unknown_option_in_sub_command_is_not_retried() {
        let diag = parse(&["split-pane", "--bogus"]).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::Grammar);
        assert!(diag.message.contains("--bogus"), "{}", diag.message);
    }

    #[test]
    fn options_without_sub_command_fall_back_to_new_tab() {
        let action = parse(&["-d", "C:\\work"]).unwrap();
        assert_eq!(
            action,
            Some(Action::NewTab(NewTerminalArgs {
                starting_directory: Some("C:\\work".to_string()),
                ..NewTerminalArgs::default()
            }))
        );

        let action = parse(&["cmd.exe", "/k", "echo"]).unwrap();
        assert_eq!(
            action,
            Some(Action::NewTab(NewTerminalArgs {
                commandline: Some("cmd.exe /k echo".to_string()),
                ..NewTerminalArgs::default()
            }))
        );
    }

    #[test]
    fn bare_program_name_is_a_default_new_tab() {
        assert_eq!(parse(&[]).unwrap(), Some(Action::default_new_tab()));
    }

    #[test]
    fn sub_command_after_separator_is_a_commandline() {
        let action = parse(&["-p", "work", "--", "split-pane"]).unwrap();
        assert_eq!(
            action,
            Some(Action::NewTab(NewTerminalArgs {
                profile: Some("work".to_string()),
                starting_directory: None,
                commandline: Some("split-pane".to_string()),
            }))
        );
    }

    #[test]
    fn failed_fallback_surfaces_its_own_error() {
        let diag = parse(&["--bogus"]).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::FallbackExhausted);
        assert_ne!(diag.status, 0);
        assert!(diag.message.contains("--bogus"), "{}", diag.message);
    }

    #[test]
    fn help_flags() {
        for flag in [NIX_HELP_FLAG, WINDOWS_HELP_FLAG] {
            let diag = parse(&[flag]).unwrap_err();
            assert_eq!(diag.kind, ErrorKind::HelpRequested);
            assert_eq!(diag.status, 0);
            assert!(diag.message.contains("new-tab"));
            assert!(diag.message.contains("split-pane"));
            assert!(diag.message.contains("focus-tab"));
        }

        let diag = parse(&["split-pane", "--help"]).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::HelpRequested);
        assert!(diag.message.contains("--horizontal"));
    }

    #[test]
    fn help_alias_only_counts_as_sole_argument() {
        let diag = parse(&["new-tab", "-?"]).unwrap_err();
        assert_eq!(diag.kind, ErrorKind::Grammar);
        assert!(diag.is_error());
    }

    #[test]
    fn state_does_not_carry_between_commands() {
        let parser = CommandParser::new();
        let (_, state) = parser
            .match_state(&cmd(&["split-pane", "-H", "-p", "work", "-d", "/tmp", "--", "top"]))
            .unwrap();
        assert!(state.split_horizontal);
        assert_eq!(state.profile_name.as_deref(), Some("work"));

        let (_, state) = parser.match_state(&cmd(&["focus-tab", "-t", "4"])).unwrap();
        assert_eq!(
            state,
            ParseState {
                focus_tab_index: Some(4),
                ..ParseState::default()
            }
        );

        let (command, state) = parser.match_state(&cmd(&["split-pane"])).unwrap();
        assert_eq!(command, SubCommand::SplitPane);
        assert_eq!(state, ParseState::default());
    }
}
