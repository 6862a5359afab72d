//! Command-line interface.

use clap::{Parser, Subcommand};

/// WorkHub - workforce administration backend
#[derive(Debug, Parser)]
#[command(name = "workhub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create a default config file with a generated signing secret
    Init,
}

impl Cli {
    /// The subcommand to run; no subcommand means `serve`.
    #[must_use]
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::parse_from(["workhub"]);
        assert!(matches!(cli.command(), Commands::Serve));
    }

    #[test]
    fn test_init_and_alias() {
        let cli = Cli::parse_from(["workhub", "init"]);
        assert!(matches!(cli.command(), Commands::Init));

        let cli = Cli::parse_from(["workhub", "daemon"]);
        assert!(matches!(cli.command(), Commands::Serve));
    }
}
