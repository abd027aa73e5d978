//! Command-line interface entry point for `fleetgraph`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use fleet_graph::config::{config_file_path, Config, ConfigLayer};
use fleet_graph::core::cancel::CancelToken;
use fleet_graph::logger::{log_to_file, set_debug, set_level, set_verbose, Level};
use fleet_graph::{error, info, warn};

/// Exit status after SIGINT/SIGTERM
const EXIT_CANCELLED: i32 = 130;

fn main() {
    let args = Cli::parse();

    // Compiled-in defaults, then the user file, then --config-* flags
    let defaults = ConfigLayer::defaults();
    let config_path = config_file_path();
    let stored = ConfigLayer::read(&config_path);
    if let Err(e) = &stored {
        eprintln!("✗ {e}; using defaults");
    }
    let overrides = args.to_config_layer();

    let empty = ConfigLayer::default();
    let user = stored.as_ref().unwrap_or(&empty);
    let config = match Config::resolve(&[&defaults, user, &overrides]) {
        Ok(config) => config,
        // The config command still runs so a bad stored value can be fixed
        Err(e) if matches!(args.command, Some(Command::Config { .. })) => {
            eprintln!("✗ {e}");
            Config::resolve(&[&defaults]).unwrap_or_default()
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    // CLI flag overrides config logging.level
    let mut level = args.log_level.map_or(config.level, Into::into);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        set_debug(true);
    }
    set_level(level);

    let verbose = args.verbose || config.verbose;
    set_verbose(verbose);

    if let Some(log_path) = args.log_file.as_ref().or(config.log_file.as_ref()) {
        let display_path = log_path.display();
        match log_to_file(log_path) {
            Ok(()) if verbose => eprintln!("✓ File logging initialized at: {display_path}"),
            Ok(()) => info!("File logging initialized at: {display_path}"),
            Err(e) => eprintln!("✗ Failed to initialize file logging at {display_path}: {e}"),
        }
    }

    let cancel = CancelToken::new();
    if let Err(e) = cancel.cancel_on_signal() {
        warn!("Could not install signal handler: {e}");
    }

    let result = match args.command {
        None => commands::render::run(&config, None, None, false, &cancel),
        Some(Command::Render {
            output,
            format,
            no_check,
        }) => commands::render::run(
            &config,
            output.as_deref(),
            format.as_deref(),
            no_check,
            &cancel,
        ),
        Some(Command::Check) => commands::check::run(),
        Some(Command::Config { subcommand }) => {
            // Edit the stored file, not the overridden runtime values
            commands::config::run(subcommand, stored, &defaults, &config_path)
        }
    };

    if let Err(e) = result {
        std::process::exit(exit_code(&e));
    }
}

/// Report a failed command and pick the process exit status
fn exit_code(err: &commands::CommandError) -> i32 {
    match err {
        commands::CommandError::Run(e) if e.is_cancelled() => {
            eprintln!("✗ Cancelled");
            EXIT_CANCELLED
        }
        other => {
            error!("{other}");
            eprintln!("✗ {other}");
            1
        }
    }
}
