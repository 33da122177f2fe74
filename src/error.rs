//! Diagnostics reported by a parse attempt.
//!
//! Every parse attempt resolves to either an action or a [`Diagnostic`]. A
//! diagnostic is not always a failure: help output carries status 0 so the
//! host can print it and exit cleanly. Anything else carries a non-zero status
//! and a message that should be shown to the user verbatim.

use std::fmt;

/// Status reported for a successful parse or a help request.
pub const STATUS_OK: i32 = 0;

/// Status reported for configuration problems.
pub const STATUS_CONFIG: i32 = 1;

/// Categorized outcomes for better diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// `-?`, `/?` or `--help` was given; the message is the help text
    HelpRequested,
    /// Unknown option, malformed value or conflicting flags
    Grammar,
    /// Both the sub-command attempt and the implicit `new-tab` retry failed
    FallbackExhausted,
    /// Error loading/parsing configuration
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::HelpRequested => write!(f, "Help"),
            ErrorKind::Grammar => write!(f, "Parse error"),
            ErrorKind::FallbackExhausted => write!(f, "Parse error"),
            ErrorKind::Config => write!(f, "Config error"),
        }
    }
}

/// Outcome of the most recent parse attempt that did not produce an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    /// Process exit status the host should use; 0 for help
    pub status: i32,
    pub message: String,
    /// Additional hint explaining what was expected
    pub context: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with just the kind, status and message
    pub fn new(kind: ErrorKind, status: i32, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            status,
            message: message.into(),
            context: None,
        }
    }

    pub fn help(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::HelpRequested, STATUS_OK, text)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, STATUS_CONFIG, message)
    }

    /// Add context string (e.g., "Valid values: abort, continue")
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// True when the host should treat this as a failure
    pub fn is_error(&self) -> bool {
        self.status != STATUS_OK
    }

    /// Message with the context hint appended.
    ///
    /// Grammar messages are already complete sentences rendered by the
    /// grammar engine, so they are returned untouched.
    pub fn display_simple(&self) -> String {
        match self.kind {
            ErrorKind::HelpRequested | ErrorKind::Grammar | ErrorKind::FallbackExhausted => {
                self.message.clone()
            }
            ErrorKind::Config => {
                let mut msg = format!("{}: {}", self.kind, self.message);
                if let Some(context) = &self.context {
                    msg.push_str(&format!("\n  hint: {}", context));
                }
                msg
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_simple())
    }
}

impl std::error::Error for Diagnostic {}

impl From<Diagnostic> for String {
    fn from(diag: Diagnostic) -> Self {
        diag.display_simple()
    }
}
