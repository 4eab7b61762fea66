//! Repository host abstraction layer
//!
//! The decision engine never talks to a repository host. Everything that
//! reads from or writes to one goes through the [RepositoryHost] trait so the
//! orchestration can run against:
//!
//! - [github::GitHubHost]: the GitHub REST API
//! - [mock::MockHost]: an in-memory host for tests
//!
//! [local::LocalRepository] is a read-only view of a local checkout used for
//! previews; it does not implement the trait because it cannot create
//! releases or comments.

pub mod github;
pub mod local;
pub mod mock;

pub use github::GitHubHost;
pub use local::LocalRepository;
pub use mock::MockHost;

use crate::error::Result;
use async_trait::async_trait;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit sha
    pub sha: String,
    /// The full commit message, header and body
    pub message: String,
}

impl CommitInfo {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        CommitInfo {
            sha: sha.into(),
            message: message.into(),
        }
    }
}

/// A comment on a pull request (issue comments on GitHub)
#[derive(Debug, Clone, PartialEq)]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
    pub author: String,
    /// Whether the author is a bot account
    pub author_is_bot: bool,
}

/// Parameters for a release object
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    pub tag: String,
    pub name: String,
    pub generate_release_notes: bool,
    pub make_latest: bool,
}

/// Result of asking the host to create a ref
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCreation {
    Created,
    /// Somebody else created it first
    AlreadyExists,
}

/// Operations the orchestration needs from a repository host
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`; the binary drives them from a tokio
/// runtime.
///
/// ## Error Handling
///
/// Transport and authentication failures surface as
/// [crate::error::AutotagError::Host]. "Not found" answers that have a
/// natural meaning (a missing ref) are values, not errors.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// List every tag name, across all pages
    async fn list_tags(&self) -> Result<Vec<String>>;

    /// Fetch the full message of the commit `reference` points to
    async fn commit_message(&self, reference: &str) -> Result<String>;

    /// List the commits of a pull request, oldest first
    async fn pull_request_commits(&self, number: u64) -> Result<Vec<CommitInfo>>;

    /// Whether a ref (e.g. `refs/tags/v1.2.3`) exists
    async fn ref_exists(&self, ref_name: &str) -> Result<bool>;

    /// Create a ref pointing at `sha`
    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation>;

    /// Create a release object; returns its URL
    async fn create_release(&self, release: &ReleaseRequest) -> Result<String>;

    /// List the comments on a pull request, across all pages
    async fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>>;

    /// Create a comment; returns its id
    async fn create_comment(&self, number: u64, body: &str) -> Result<u64>;

    /// Replace the body of an existing comment
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()>;
}
