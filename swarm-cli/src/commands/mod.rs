//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod issues;
mod resolve;

pub use issues::IssueCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Browse the repository's issues
    Issues {
        #[command(subcommand)]
        command: IssueCommands,
    },
    /// Scope and implement issues with the agent
    Resolve {
        /// Every open issue of the repository
        #[arg(long, conflicts_with = "numbers")]
        all: bool,

        /// Issue numbers, processed in this order
        #[arg(required_unless_present = "all")]
        numbers: Vec<u64>,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Issues { command } => issues::handle_issue_command(command, config).await,
        Commands::Resolve { all, numbers } => resolve::resolve(config, all, numbers).await,
    }
}

/// Prints a horizontal rule
pub(crate) fn print_rule(ch: char) {
    println!("{}", ch.to_string().repeat(80));
}

/// Greedy word wrap; words longer than `width` stay on their own line
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert_eq!(wrap("averyveryverylongword x", 5), vec!["averyveryverylongword", "x"]);
    }

    #[test]
    fn test_resolve_arguments() {
        let cli = TestCli::try_parse_from(["swarm", "resolve", "3", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Resolve { all: false, ref numbers } if numbers == &[3, 1]
        ));

        let cli = TestCli::try_parse_from(["swarm", "resolve", "--all"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { all: true, .. }));

        assert!(TestCli::try_parse_from(["swarm", "resolve"]).is_err());
        assert!(TestCli::try_parse_from(["swarm", "resolve", "--all", "2"]).is_err());
        assert!(TestCli::try_parse_from(["swarm", "resolve", "two"]).is_err());
    }
}
