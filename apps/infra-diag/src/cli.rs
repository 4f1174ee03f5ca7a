//! CLI argument parsing via `clap`.

use crate::output::OutputMode;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "infra-diag",
    version,
    about = "Infrastructure agent diagnostics",
    long_about = "infra-diag — check infrastructure agent configuration before deploying it.\n\nThe plugin directory is taken from PATH, then NRIA_PLUGIN_DIR, then plugin_dir in the agent config, then /etc/newrelic-infra/integrations.d.",
    after_help = "Examples:\n  infra-diag validate\n  infra-diag -c /etc/newrelic-infra.yml validate --output json\n  infra-diag validate integration-config.yml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Verbose output")]
    pub verbose: bool,
    #[arg(short, long, global = true, help = "Override default agent configuration file")]
    pub config: Option<String>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current infra-diag version.")]
    Version,
    /// Validate integration configs
    #[command(
        about = "Validate infra agent configurations",
        long_about = "Check every file under the plugin directory (or a single file): first that it is valid YAML, then that it matches the integrations config schema. All files are checked and every failure is reported.",
        after_help = "Examples:\n  infra-diag validate\n  infra-diag validate /etc/newrelic-infra/integrations.d --parallel\n  infra-diag validate integration-config.yml --output json"
    )]
    Validate {
        #[arg(help = "Directory or file to validate (default: plugin dir from agent config)")]
        path: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputMode::Human, help = "Output mode")]
        output: OutputMode,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Validate files in parallel")]
        parallel: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_with_globals() {
        let cli = Cli::try_parse_from([
            "infra-diag",
            "validate",
            "/etc/integrations.d",
            "-v",
            "--config",
            "/etc/agent.yml",
            "--output",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("/etc/agent.yml"));
        match cli.cmd {
            Commands::Validate {
                path,
                output,
                parallel,
            } => {
                assert_eq!(path.as_deref(), Some("/etc/integrations.d"));
                assert_eq!(output, OutputMode::Json);
                assert!(!parallel);
            }
            Commands::Version => panic!("expected validate"),
        }
    }

    #[test]
    fn test_validate_defaults() {
        let cli = Cli::try_parse_from(["infra-diag", "validate"]).unwrap();
        assert!(!cli.verbose);
        match cli.cmd {
            Commands::Validate { path, output, .. } => {
                assert!(path.is_none());
                assert_eq!(output, OutputMode::Human);
            }
            Commands::Version => panic!("expected validate"),
        }
    }

    #[test]
    fn test_rejects_unknown_output_mode() {
        assert!(Cli::try_parse_from(["infra-diag", "validate", "--output", "xml"]).is_err());
    }
}
