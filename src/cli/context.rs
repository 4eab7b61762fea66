//! Invoking environment of a workflow run
//!
//! Everything the `run` command needs from the CI runner: the repository,
//! the credentials, the pull request event, and where step outputs go.

use crate::cli::orchestration::WorkflowResult;
use crate::error::{AutotagError, Result};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The pull request the run was triggered for
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestEvent {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestEvent>,
}

impl PullRequestEvent {
    /// Parse the event payload of a pull request run
    pub fn from_json(payload: &str) -> Result<Self> {
        let event: EventPayload = serde_json::from_str(payload)?;
        event.pull_request.ok_or_else(|| {
            AutotagError::missing_context("event payload has no pull_request object")
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let payload = fs::read_to_string(path)?;
        Self::from_json(&payload)
    }

    /// Title and body, consulted when no commit message calls for a bump
    pub fn fallback_text(&self) -> String {
        match self.body.as_deref().map(str::trim) {
            Some(body) if !body.is_empty() => format!("{}\n\n{}", self.title, body),
            _ => self.title.clone(),
        }
    }

    /// Merge commit, only once the pull request is actually merged
    pub fn merge_sha(&self) -> Option<&str> {
        if !self.merged {
            return None;
        }
        self.merge_commit_sha
            .as_deref()
            .filter(|sha| !sha.trim().is_empty())
    }
}

/// Values read from the runner environment
#[derive(Debug, Clone, PartialEq)]
pub struct ActionContext {
    pub owner: String,
    pub repo: String,
    pub token: String,
    pub api_url: Option<String>,
    pub event_path: PathBuf,
    pub output_path: Option<PathBuf>,
}

impl ActionContext {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the context from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let repository = non_empty("GITHUB_REPOSITORY")
            .ok_or_else(|| AutotagError::missing_context("GITHUB_REPOSITORY is not set"))?;
        let (owner, repo) = crate::git::GitHubHost::parse_repo(&repository).ok_or_else(|| {
            AutotagError::missing_context(format!(
                "GITHUB_REPOSITORY '{}' is not in owner/repo form",
                repository
            ))
        })?;

        let token = non_empty("INPUT_GITHUB_TOKEN")
            .or_else(|| non_empty("GITHUB_TOKEN"))
            .ok_or_else(|| AutotagError::missing_context("no GitHub token provided"))?;

        let event_path = non_empty("GITHUB_EVENT_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| AutotagError::missing_context("GITHUB_EVENT_PATH is not set"))?;

        Ok(ActionContext {
            owner,
            repo,
            token,
            api_url: non_empty("GITHUB_API_URL"),
            event_path,
            output_path: non_empty("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }

    pub fn load_event(&self) -> Result<PullRequestEvent> {
        PullRequestEvent::from_file(&self.event_path)
    }
}

/// Step outputs as `(name, value)` pairs
pub fn outputs(result: &WorkflowResult) -> Vec<(&'static str, String)> {
    let decision = &result.decision;
    vec![
        ("bump", decision.bump().as_str().to_string()),
        ("tag", decision.tag().unwrap_or_default().to_string()),
        ("created", result.tag_created.to_string()),
        (
            "skip_reason",
            decision
                .skip_reason()
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        ),
    ]
}

/// Append step outputs to the runner's output file
pub fn write_outputs(path: &Path, result: &WorkflowResult) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (name, value) in outputs(result) {
        writeln!(file, "{}={}", name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_event_parsing() {
        let event = PullRequestEvent::from_json(
            r#"{"action": "closed", "pull_request": {"number": 12, "title": "fix: crash", "body": null, "merged": true, "merge_commit_sha": "abc123"}}"#,
        )
        .unwrap();
        assert_eq!(event.number, 12);
        assert_eq!(event.merge_sha(), Some("abc123"));
        assert_eq!(event.fallback_text(), "fix: crash");
    }

    #[test]
    fn test_event_without_pull_request() {
        let result = PullRequestEvent::from_json(r#"{"ref": "refs/heads/main"}"#);
        assert!(matches!(result, Err(AutotagError::MissingContext(_))));

        let result = PullRequestEvent::from_json("not json");
        assert!(matches!(result, Err(AutotagError::Event(_))));
    }

    #[test]
    fn test_merge_sha_requires_merged() {
        let event = PullRequestEvent {
            number: 1,
            title: String::new(),
            body: None,
            merged: false,
            merge_commit_sha: Some("test-merge".to_string()),
        };
        assert_eq!(event.merge_sha(), None);
    }

    #[test]
    fn test_fallback_text_joins_title_and_body() {
        let event = PullRequestEvent {
            number: 1,
            title: "Add exporter".to_string(),
            body: Some("feat: csv export\n".to_string()),
            merged: true,
            merge_commit_sha: None,
        };
        assert_eq!(event.fallback_text(), "Add exporter\n\nfeat: csv export");
        assert_eq!(event.merge_sha(), None);
    }

    #[test]
    fn test_context_from_lookup() {
        let vars = env(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_TOKEN", "fallback-token"),
            ("INPUT_GITHUB_TOKEN", "input-token"),
            ("GITHUB_EVENT_PATH", "/tmp/event.json"),
            ("GITHUB_OUTPUT", ""),
        ]);
        let ctx = ActionContext::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(ctx.owner, "octo");
        assert_eq!(ctx.repo, "widgets");
        assert_eq!(ctx.token, "input-token");
        assert_eq!(ctx.api_url, None);
        assert_eq!(ctx.output_path, None);
    }

    #[test]
    fn test_context_missing_values() {
        let vars = env(&[("GITHUB_REPOSITORY", "octo/widgets")]);
        let err = ActionContext::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert!(err.to_string().contains("token"));

        let vars = env(&[
            ("GITHUB_REPOSITORY", "widgets"),
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_EVENT_PATH", "/e"),
        ]);
        let err = ActionContext::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert!(err.to_string().contains("owner/repo"));
    }
}
