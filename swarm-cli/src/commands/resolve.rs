//! Resolve command handler
//!
//! Sends issues through the scope-and-implement batch and prints what the agent
//! produced for each of them.

use anyhow::Result;
use colored::*;
use serde_json::{Map, Value};
use swarm_client::SwarmClient;
use swarm_core::domain::outcome::{BatchResult, Outcome, OutcomeStatus};
use swarm_core::dto::batch::BatchRequest;

use super::{print_rule, wrap};
use crate::config::Config;
use crate::spinner::Spinner;

const MAX_FILES: usize = 8;
const MAX_COMMITS: usize = 5;
const MAX_COMMIT_LEN: usize = 200;

/// Run a batch on the selected repository
pub async fn resolve(config: &Config, all: bool, numbers: Vec<u64>) -> Result<()> {
    let client = SwarmClient::new(&config.server_url);
    let repo = config.repo()?;

    let request = if all {
        println!("{}", format!("Scope & Execute (batch) for ALL issues in '{}'", repo).bold());
        BatchRequest::all()
    } else {
        println!("{}", format!("Scope & Execute (batch) for {}: {:?}", repo, numbers).bold());
        BatchRequest::issues(numbers)
    };
    println!(
        "{}",
        format!("(POST {}/{}/issues/scope-and-execute-batch)", client.base_url(), repo).dimmed()
    );

    let spinner = Spinner::start("Working with the agent (this can take a while)...");
    let response = tokio::select! {
        res = client.run_batch(repo, &request) => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.stop().await;

    let result = match response {
        Some(Ok(result)) => result,
        Some(Err(e)) => anyhow::bail!(e.user_message()),
        None => {
            println!("{}", "Interrupted; the server keeps running the batch.".yellow());
            return Ok(());
        }
    };

    print_batch_result(&result);
    Ok(())
}

fn print_batch_result(result: &BatchResult) {
    println!("Finished scope & execute batch for repo '{}'", result.repo);
    println!();
    println!(
        "Selected issues: {}   Succeeded: {}   Failed: {}   Skipped: {}",
        result.total_selected,
        result.succeeded.to_string().green(),
        result.failed.to_string().red(),
        result.skipped.to_string().yellow()
    );
    print_rule('-');

    for outcome in &result.results {
        print_outcome(outcome);
        print_rule('-');
    }
}

fn print_outcome(outcome: &Outcome) {
    let status = match outcome.status {
        OutcomeStatus::Success => "success".green(),
        OutcomeStatus::Failed => "failed".red(),
        OutcomeStatus::Skipped => "skipped".yellow(),
    };
    println!("Issue #{}: {}", outcome.issue_number, status);

    for line in outcome_details(outcome) {
        println!("{}", line);
    }
}

/// Detail lines printed under an outcome's header
fn outcome_details(outcome: &Outcome) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(error) = &outcome.error {
        lines.push(format!("  • Error: {}", error));
    }
    if let Some(reason) = &outcome.reason {
        lines.push(format!("  • Reason: {}", reason));
    }

    if let Some(scoped) = &outcome.scoped {
        if let Some(summary) = text_field(scoped, &["summary"]) {
            lines.push("  • Summary:".to_string());
            lines.extend(wrap(&summary, 74).into_iter().map(|l| format!("     {}", l)));
        }
        if let Some(confidence) = text_field(scoped, &["confidence_score", "confidence"]) {
            lines.push(format!("  • Confidence: {}", confidence));
        }
        if let Some(Value::Array(plan)) = scoped.get("action_plan") {
            lines.push(format!("  • Plan steps: {}", plan.len()));
        }
    }

    if let Some(executed) = &outcome.executed {
        if let Some(url) = text_field(executed, &["pull_request_url", "pr_url"]) {
            lines.push(format!("  • Pull Request: {}", url));
        }
        if let Some(branch) = text_field(executed, &["branch_name"]) {
            lines.push(format!("  • Branch: {}", branch));
        }
        lines.extend(files_lines(executed));
        lines.extend(commit_lines(executed));
    }

    lines
}

fn files_lines(executed: &Map<String, Value>) -> Vec<String> {
    let files = ["files_created", "files_changed"]
        .iter()
        .filter_map(|key| executed.get(*key))
        .find(|v| is_present(v));

    match files {
        Some(Value::Array(files)) => {
            let mut lines = vec!["  • Files:".to_string()];
            for file in files.iter().take(MAX_FILES) {
                lines.push(format!("     - {}", display(file)));
            }
            if files.len() > MAX_FILES {
                lines.push(format!("     - ...and {} more", files.len() - MAX_FILES));
            }
            lines
        }
        Some(other) => vec![format!("  • Files: {}", display(other))],
        None => vec![],
    }
}

fn commit_lines(executed: &Map<String, Value>) -> Vec<String> {
    let commits: Vec<&Value> = match executed.get("commits") {
        Some(Value::Array(commits)) if !commits.is_empty() => commits.iter().collect(),
        Some(commit) if is_present(commit) => vec![commit],
        _ => return vec![],
    };

    let mut lines = vec!["  • Commits:".to_string()];
    for commit in commits.into_iter().take(MAX_COMMITS) {
        let text: String = display(commit).trim().chars().take(MAX_COMMIT_LEN).collect();
        lines.push(format!("     - {}", text));
    }
    lines
}

/// First present field among `keys`, rendered as text
fn text_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| is_present(v))
        .map(display)
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        _ => true,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
