//! Sticky status comment on the pull request
//!
//! One comment per pull request, found again on later runs through a marker
//! pair embedded as HTML comments. Only bot-authored comments are ever
//! updated, so a person quoting the marker cannot take the comment over.

use crate::analyzer::TagDecision;
use crate::error::Result;
use crate::git::{IssueComment, RepositoryHost};
use tracing::debug;

/// What the upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created(u64),
    Updated(u64),
}

/// Marker-delimited comment identified by `marker`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyComment {
    marker: String,
}

impl StickyComment {
    pub fn new(marker: impl Into<String>) -> Self {
        StickyComment {
            marker: marker.into(),
        }
    }

    pub fn start_marker(&self) -> String {
        format!("<!--{}:start-->", self.marker)
    }

    pub fn end_marker(&self) -> String {
        format!("<!--{}:end-->", self.marker)
    }

    /// Wrap `content` between the markers
    pub fn wrap(&self, content: &str) -> String {
        format!(
            "{}\n{}\n{}",
            self.start_marker(),
            content.trim_end(),
            self.end_marker()
        )
    }

    /// The comment to update, if one exists
    pub fn find<'a>(&self, comments: &'a [IssueComment]) -> Option<&'a IssueComment> {
        let start = self.start_marker();
        comments
            .iter()
            .find(|c| c.author_is_bot && c.body.contains(&start))
    }

    /// Create or update the sticky comment on pull request `number`
    pub async fn upsert<H>(&self, host: &H, number: u64, content: &str) -> Result<CommentAction>
    where
        H: RepositoryHost + ?Sized,
    {
        let body = self.wrap(content);
        let comments = host.list_comments(number).await?;

        match self.find(&comments) {
            Some(existing) => {
                debug!("Updating comment {} on #{}", existing.id, number);
                host.update_comment(existing.id, &body).await?;
                Ok(CommentAction::Updated(existing.id))
            }
            None => {
                let id = host.create_comment(number, &body).await?;
                debug!("Created comment {} on #{}", id, number);
                Ok(CommentAction::Created(id))
            }
        }
    }
}

/// Markdown summary of a decision and what was done about it
pub fn render_decision(decision: &TagDecision, tag_created: bool, dry_run: bool) -> String {
    let mut out = String::from("### Version tag\n\n");

    let Some(plan) = decision.plan() else {
        out.push_str("No version bump: no conventional commit keywords found (`feat:`, `fix:`, `!`, `BREAKING CHANGE`).\n");
        return out;
    };

    let status = if tag_created {
        format!("created `{}`", plan.tag)
    } else if decision.exists_already() {
        format!("`{}` already exists, nothing to do", plan.tag)
    } else if dry_run {
        format!("would create `{}` (dry run)", plan.tag)
    } else {
        format!("will create `{}` once merged", plan.tag)
    };

    out.push_str(&format!(
        "| | |\n|---|---|\n| Bump | {} |\n| Baseline | `{}` |\n| Next | `{}` |\n| Status | {} |\n",
        plan.bump, plan.baseline, plan.tag, status
    ));
    out
}
