use std::env;
use std::process;

use log::debug;
use startup_args::{build_commands, StartupSession, STATUS_OK};

mod config;

use config::{apply_config_env, load_config, ErrorPolicy, LaunchConfig};

fn main() {
    init_logging();
    let mut config = LaunchConfig::default();
    if let Err(err) = load_config(&mut config) {
        eprintln!("config error: {err}");
    }
    apply_config_env(&mut config);

    let status = run(env::args().skip(1), &config);
    process::exit(status);
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or("STARTUP_ARGS_LOG", "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Parse the whole chain and print the startup actions, one per line.
///
/// Help goes to stdout and stops the launch with status 0. Parse errors go to
/// stderr; under [`ErrorPolicy::Continue`] the remaining commands are still
/// parsed and the first failing status is returned.
fn run(args: impl Iterator<Item = String>, config: &LaunchConfig) -> i32 {
    let commands = build_commands(args);
    debug!(
        "launch event=start commands={} on_error={:?}",
        commands.len(),
        config.on_error
    );

    let mut session = StartupSession::new();
    let mut status = STATUS_OK;
    for command in &commands {
        let Err(diag) = session.parse_command(command) else {
            continue;
        };
        if !diag.is_error() {
            println!("{}", diag.message.trim_end());
            return STATUS_OK;
        }
        eprintln!("{}", diag.message.trim_end());
        if status == STATUS_OK {
            status = diag.status;
        }
        if config.on_error == ErrorPolicy::Abort {
            return status;
        }
    }

    session.validate_startup_commands();
    for action in session.startup_actions() {
        println!("{action}");
    }
    status
}
