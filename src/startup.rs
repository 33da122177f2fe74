//! The startup action queue and the session that fills it.
use std::collections::VecDeque;

use log::debug;

use crate::actions::Action;
use crate::error::{Diagnostic, STATUS_OK};
use crate::parse::{CommandParser, Commandline};

/// Make sure the queue starts by opening a tab.
///
/// A chain like `split-pane -H` would otherwise have no tab to split, so a
/// `NewTab` without overrides is prepended when the queue is empty or starts
/// with anything else. Call this once per session: synthetic actions are not
/// marked, so calling it again after the first action was consumed adds
/// another tab.
pub fn ensure_leading_new_tab(actions: &mut VecDeque<Action>) {
    if actions.front().map_or(true, |action| !action.is_new_tab()) {
        debug!("startup event=prepend-new-tab queued={}", actions.len());
        actions.push_front(Action::default_new_tab());
    }
}

/// Parses the commands of a launch and buffers the resulting actions.
#[derive(Debug, Default)]
pub struct StartupSession {
    parser: CommandParser,
    startup_actions: VecDeque<Action>,
    last_status: i32,
    exit_message: String,
}

impl StartupSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one command, appending its action (if any) to the queue.
    ///
    /// The outcome replaces the previous status and exit message. A failure
    /// leaves actions queued by earlier commands in place; whether to carry on
    /// with the rest of a chain is up to the caller.
    pub fn parse_command(&mut self, command: &Commandline) -> Result<(), Diagnostic> {
        match self.parser.parse(command) {
            Ok(action) => {
                if let Some(action) = action {
                    self.startup_actions.push_back(action);
                }
                self.last_status = STATUS_OK;
                self.exit_message.clear();
                Ok(())
            }
            Err(diag) => {
                self.last_status = diag.status;
                self.exit_message = diag.message.clone();
                Err(diag)
            }
        }
    }

    /// Prepend a `NewTab` unless the queue already starts with one.
    pub fn validate_startup_commands(&mut self) {
        ensure_leading_new_tab(&mut self.startup_actions);
    }

    pub fn startup_actions(&self) -> &VecDeque<Action> {
        &self.startup_actions
    }

    pub fn startup_actions_mut(&mut self) -> &mut VecDeque<Action> {
        &mut self.startup_actions
    }

    pub fn into_startup_actions(self) -> VecDeque<Action> {
        self.startup_actions
    }

    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Help text or error message from the most recent parse, empty on success.
    pub fn exit_message(&self) -> &str {
        &self.exit_message
    }
}
