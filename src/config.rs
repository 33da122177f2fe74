use std::env;
use std::fs;
use std::io;

use startup_args::Diagnostic;

/// Overrides the `on_error` setting from the rc file.
pub const ON_ERROR_ENV: &str = "STARTUP_ARGS_ON_ERROR";

/// What to do with the rest of a chain once one command fails to parse.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    #[default]
    Abort,
    Continue,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LaunchConfig {
    pub on_error: ErrorPolicy,
}

pub fn load_config(config: &mut LaunchConfig) -> io::Result<()> {
    let Some(home) = env::var("HOME").ok() else {
        return Ok(());
    };
    let path = format!("{home}/.startup_argsrc");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    apply_config_lines(config, &content);
    Ok(())
}

/// Apply `key=value` lines; bad lines are reported and skipped.
pub fn apply_config_lines(config: &mut LaunchConfig, content: &str) {
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            log::warn!("config:{}: unrecognized directive", idx + 1);
            continue;
        };
        let key = key.trim();
        let value = strip_quotes(value.trim());
        if key.eq_ignore_ascii_case("on_error") {
            match parse_error_policy(value) {
                Ok(policy) => config.on_error = policy,
                Err(err) => log::warn!("config:{}: {err}", idx + 1),
            }
            continue;
        }
        log::warn!("config:{}: unknown key '{key}'", idx + 1);
    }
}

pub fn apply_config_env(config: &mut LaunchConfig) {
    if let Ok(value) = env::var(ON_ERROR_ENV) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        match parse_error_policy(trimmed) {
            Ok(policy) => config.on_error = policy,
            Err(err) => log::warn!("config error: invalid {ON_ERROR_ENV}: {err}"),
        }
    }
}

pub fn parse_error_policy(value: &str) -> Result<ErrorPolicy, String> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "abort" | "stop" => Ok(ErrorPolicy::Abort),
        "continue" | "keep-going" => Ok(ErrorPolicy::Continue),
        _ => Err(Diagnostic::config(format!("Invalid on_error value: {}", value))
            .with_context("Valid values: abort/stop, continue/keep-going")
            .into()),
    }
}

fn strip_quotes(input: &str) -> &str {
    let bytes = input.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &input[1..bytes.len() - 1];
        }
    }
    input
}
