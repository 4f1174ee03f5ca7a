//! infra-diag CLI binary entry point.
//! Resolves the plugin directory, runs validation, and maps the result to an
//! exit code.

use clap::Parser;
use infra_diag::cli::{Cli, Commands};
use infra_diag::logging::{self, LogHandle};
use infra_diag::output::{self, OutputMode};
use infra_diag::{config, validate_path, ValidateOptions};
use std::path::Path;
use tracing::{error, info};

const EXIT_CONFIG: i32 = 1;
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let log = logging::init(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            path,
            output,
            parallel,
        } => {
            let code = run_validate(
                &log,
                cli.verbose,
                cli.config.as_deref(),
                path.as_deref(),
                output,
                parallel,
            );
            if code != 0 {
                std::process::exit(code);
            }
        }
    }
}

fn run_validate(
    log: &LogHandle,
    verbose: bool,
    config_path: Option<&str>,
    path: Option<&str>,
    output: OutputMode,
    parallel: bool,
) -> i32 {
    // An explicit path needs the agent config only when one was named.
    let agent_cfg = if path.is_some() && config_path.is_none() {
        config::AgentConfig::default()
    } else {
        match config::load_agent_config(config_path.map(Path::new)) {
            Ok(loaded) => {
                if let Some(src) = loaded.source.as_ref() {
                    info!(path = %src.display(), "Loaded agent config");
                }
                loaded.config
            }
            Err(e) => {
                error!(error = %e, "got an error loading agent config");
                return EXIT_CONFIG;
            }
        }
    };
    if agent_cfg.verbose() && !verbose {
        log.set_verbose();
    }

    let env_dir = std::env::var(config::PLUGIN_DIR_ENV).ok();
    let dir = config::resolve_plugin_dir(path, env_dir.as_deref(), &agent_cfg);
    info!("Found plugin dir: {}", dir.display());

    match validate_path(&dir, &ValidateOptions { parallel }) {
        Ok(report) => {
            output::print_report(&report, output);
            if report.passed {
                0
            } else {
                error!("failed validating plugin dir");
                EXIT_INVALID
            }
        }
        Err(e) => {
            error!(error = %e, "failed validating plugin dir");
            EXIT_INVALID
        }
    }
}
