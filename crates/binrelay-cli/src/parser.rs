//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the relay server.
#[derive(Parser)]
#[command(name = "binrelay")]
#[command(about = "Relay binary payloads to caller-supplied HTTP endpoints")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["binrelay", "--verbose", "serve"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Serve(_))));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["binrelay"]);
        assert!(cli.command.is_none());
    }
}
