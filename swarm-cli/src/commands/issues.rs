//! Issue command handlers
//!
//! Listing and viewing the issues of the selected repository.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use swarm_client::SwarmClient;
use swarm_core::dto::issue::{IssueDetail, IssueSummary};

use super::{print_rule, wrap};
use crate::config::Config;

/// Issue subcommands
#[derive(Subcommand)]
pub enum IssueCommands {
    /// List the repository's open issues
    List,
    /// Show one issue
    ///
    /// Reads the orchestrator's cached listing; run `issues list` first.
    Show {
        /// Issue number
        number: u64,
    },
}

/// Handle issue commands
pub async fn handle_issue_command(command: IssueCommands, config: &Config) -> Result<()> {
    let client = SwarmClient::new(&config.server_url);
    let repo = config.repo()?;

    match command {
        IssueCommands::List => list_issues(&client, repo).await,
        IssueCommands::Show { number } => show_issue(&client, repo, number).await,
    }
}

async fn list_issues(client: &SwarmClient, repo: &str) -> Result<()> {
    let list = client
        .list_issues(repo)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let mut issues = match list.issues {
        Some(issues) if !issues.is_empty() => issues,
        _ => {
            let msg = list.message.unwrap_or_else(|| "No issues found.".to_string());
            println!("{}", msg.yellow());
            return Ok(());
        }
    };
    issues.sort_by_key(|i| i.number);

    println!();
    println!("{}", format!("Issues for repo '{}':", repo).bold());
    print_rule('-');
    for issue in &issues {
        print_issue_summary(issue);
    }
    print_rule('-');

    Ok(())
}

async fn show_issue(client: &SwarmClient, repo: &str, number: u64) -> Result<()> {
    let issue = client
        .get_issue(repo, number)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    print_issue_details(&issue);
    Ok(())
}

fn print_issue_summary(issue: &IssueSummary) {
    println!(
        "{} [{:<6}] {}",
        format!("#{:<5}", issue.number).cyan(),
        issue.state,
        issue.title
    );
    println!("     URL: {}", issue.url.dimmed());
}

fn print_issue_details(issue: &IssueDetail) {
    println!();
    println!(
        "{} [{}] {}",
        format!("#{}", issue.number).cyan(),
        issue.state,
        issue.title.bold()
    );
    print_rule('=');
    let body = if issue.body.trim().is_empty() {
        "(no body)"
    } else {
        issue.body.as_str()
    };
    for line in wrap(body, 78) {
        println!("{}", line);
    }
    print_rule('=');
    println!("URL: {}", issue.url);
    println!();
}
