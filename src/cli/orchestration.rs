//! Main workflow orchestration logic
//!
//! Turns a pull request event into a tag decision and acts on it through a
//! [RepositoryHost]. Kept apart from `main.rs` so the whole flow can run
//! against [crate::git::MockHost] in tests.

use crate::analyzer::{Baseline, DecisionEngine, TagDecision};
use crate::boundary::BoundaryWarning;
use crate::cli::context::PullRequestEvent;
use crate::comment::{render_decision, StickyComment};
use crate::config::Config;
use crate::domain::tag;
use crate::error::{AutotagError, Result};
use crate::git::{RefCreation, ReleaseRequest, RepositoryHost};
use tracing::{debug, info, warn};

/// Result of a publish workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub decision: TagDecision,
    /// Whether this run created the tag ref
    pub tag_created: bool,
    pub release_url: Option<String>,
    pub warnings: Vec<BoundaryWarning>,
}

impl WorkflowResult {
    fn new(decision: TagDecision) -> Self {
        WorkflowResult {
            decision,
            tag_created: false,
            release_url: None,
            warnings: Vec::new(),
        }
    }
}

/// Main publish workflow
///
/// 1. Collect the commit messages of the pull request
/// 2. Decide on the next tag from the host's tags
/// 3. Refuse to tag an unmerged pull request (unless dry run)
/// 4. Skip if the tag already exists on the host
/// 5. Create the tag at the merge commit, then the release
/// 6. Report in the sticky comment
///
/// Release and comment failures are returned as warnings; only failures that
/// leave nothing done are errors.
pub async fn run_publish_workflow<H>(
    host: &H,
    event: &PullRequestEvent,
    config: &Config,
) -> Result<WorkflowResult>
where
    H: RepositoryHost + ?Sized,
{
    let engine = DecisionEngine::from_config(config);

    let mut corpus: Vec<String> = host
        .pull_request_commits(event.number)
        .await?
        .into_iter()
        .map(|c| c.message)
        .collect();
    if let Some(sha) = event.merge_sha() {
        corpus.push(host.commit_message(sha).await?);
    }
    debug!("Analyzing {} commit message(s) of #{}", corpus.len(), event.number);

    let tags = host.list_tags().await?;
    let fallback = event.fallback_text();
    let decision = engine.decide(&corpus, &tags, Some(&fallback));

    let mut result = WorkflowResult::new(decision);
    if let Some(Baseline::Zero { .. }) = result.decision.plan().map(|p| &p.baseline) {
        result.warnings.push(BoundaryWarning::NoValidTags {
            tag_count: tags.len(),
        });
    }

    let Some(plan) = result.decision.plan().cloned() else {
        info!("No version bump for #{}", event.number);
        report(host, event, config, &mut result).await;
        return Ok(result);
    };

    if !event.merged {
        if !config.dry_run {
            return Err(AutotagError::NotMerged(event.number));
        }
        info!("Dry run: #{} would be tagged {} once merged", event.number, plan.tag);
        report(host, event, config, &mut result).await;
        return Ok(result);
    }

    let sha = event
        .merge_sha()
        .ok_or(AutotagError::MissingMergeCommit(event.number))?
        .to_string();

    let ref_name = tag::ref_name(&plan.tag);
    let exists = host.ref_exists(&ref_name).await?;
    result.decision = engine.resolve_existing(result.decision, exists);
    if exists {
        report(host, event, config, &mut result).await;
        return Ok(result);
    }

    if config.dry_run {
        info!("Dry run: would create {} at {}", plan.tag, sha);
        report(host, event, config, &mut result).await;
        return Ok(result);
    }

    match host.create_ref(&ref_name, &sha).await? {
        RefCreation::Created => result.tag_created = true,
        RefCreation::AlreadyExists => {
            warn!("{} appeared while this run was deciding", ref_name);
            result.decision = result.decision.into_already_exists();
            result
                .warnings
                .push(BoundaryWarning::TagCreatedConcurrently { tag: plan.tag });
            report(host, event, config, &mut result).await;
            return Ok(result);
        }
    }

    if config.create_release {
        let release = ReleaseRequest {
            tag: plan.tag.clone(),
            name: plan.tag.clone(),
            generate_release_notes: config.generate_release_notes,
            make_latest: config.mark_release_as_latest,
        };
        match host.create_release(&release).await {
            Ok(url) => {
                info!("Created release {}", url);
                result.release_url = Some(url);
            }
            Err(e) => result.warnings.push(BoundaryWarning::ReleaseFailed {
                tag: plan.tag.clone(),
                reason: e.to_string(),
            }),
        }
    }

    report(host, event, config, &mut result).await;
    Ok(result)
}

/// Upsert the sticky comment when enabled; failures become warnings
async fn report<H>(host: &H, event: &PullRequestEvent, config: &Config, result: &mut WorkflowResult)
where
    H: RepositoryHost + ?Sized,
{
    if !config.comment_pr {
        return;
    }

    let sticky = StickyComment::new(config.comment.marker.as_str());
    let body = render_decision(&result.decision, result.tag_created, config.dry_run);
    if let Err(e) = sticky.upsert(host, event.number, &body).await {
        result.warnings.push(BoundaryWarning::CommentFailed {
            reason: e.to_string(),
        });
    }
}
