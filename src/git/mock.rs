use crate::error::{AutotagError, Result};
use crate::git::{CommitInfo, IssueComment, RefCreation, ReleaseRequest, RepositoryHost};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MockState {
    tags: Vec<String>,
    refs: HashSet<String>,
    commit_messages: HashMap<String, String>,
    pull_commits: HashMap<u64, Vec<CommitInfo>>,
    comments: Vec<(u64, IssueComment)>,
    created_refs: Vec<(String, String)>,
    releases: Vec<ReleaseRequest>,
    next_comment_id: u64,
    fail_release: bool,
    fail_comments: bool,
    hidden_refs: HashSet<String>,
}

/// Mock repository host for testing without network access
///
/// Records every mutation so tests can assert on what the workflow did.
#[derive(Default)]
pub struct MockHost {
    state: Mutex<MockState>,
}

impl MockHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // a panicking test thread must not hide the recorded state from others
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a tag; it is listed and its ref exists
    pub fn add_tag(&self, name: impl Into<String>) {
        let name = name.into();
        let mut state = self.state();
        state.refs.insert(format!("refs/tags/{}", name));
        state.tags.push(name);
    }

    /// Add a tag ref that the tag listing does not return
    pub fn add_unlisted_tag(&self, name: &str) {
        self.state().refs.insert(format!("refs/tags/{}", name));
    }

    /// Add a commit to a pull request
    pub fn add_pull_commit(&self, number: u64, commit: CommitInfo) {
        let mut state = self.state();
        state
            .commit_messages
            .insert(commit.sha.clone(), commit.message.clone());
        state.pull_commits.entry(number).or_default().push(commit);
    }

    /// Make a commit resolvable by sha without attaching it to a pull request
    pub fn add_commit(&self, commit: CommitInfo) {
        self.state().commit_messages.insert(commit.sha, commit.message);
    }

    /// Add an existing comment on a pull request
    pub fn add_comment(&self, number: u64, body: &str, author: &str, author_is_bot: bool) -> u64 {
        let mut state = self.state();
        state.next_comment_id += 1;
        let id = state.next_comment_id;
        state.comments.push((
            number,
            IssueComment {
                id,
                body: body.to_string(),
                author: author.to_string(),
                author_is_bot,
            },
        ));
        id
    }

    /// Make release creation fail
    pub fn fail_releases(&self) {
        self.state().fail_release = true;
    }

    /// Make every comment operation fail
    pub fn fail_comments(&self) {
        self.state().fail_comments = true;
    }

    /// Simulate a ref created by a concurrent run: invisible to `ref_exists`
    /// but rejected by `create_ref`
    pub fn add_concurrent_ref(&self, ref_name: impl Into<String>) {
        self.state().hidden_refs.insert(ref_name.into());
    }

    /// Refs created through the host, as `(ref, sha)`
    pub fn created_refs(&self) -> Vec<(String, String)> {
        self.state().created_refs.clone()
    }

    pub fn releases(&self) -> Vec<ReleaseRequest> {
        self.state().releases.clone()
    }

    /// Comments currently on a pull request
    pub fn comments(&self, number: u64) -> Vec<IssueComment> {
        self.state()
            .comments
            .iter()
            .filter(|(n, _)| *n == number)
            .map(|(_, c)| c.clone())
            .collect()
    }
}

#[async_trait]
impl RepositoryHost for MockHost {
    async fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.state().tags.clone())
    }

    async fn commit_message(&self, reference: &str) -> Result<String> {
        self.state()
            .commit_messages
            .get(reference)
            .cloned()
            .ok_or_else(|| AutotagError::host(format!("No commit for reference {}", reference)))
    }

    async fn pull_request_commits(&self, number: u64) -> Result<Vec<CommitInfo>> {
        Ok(self
            .state()
            .pull_commits
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn ref_exists(&self, ref_name: &str) -> Result<bool> {
        Ok(self.state().refs.contains(ref_name))
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation> {
        let mut state = self.state();
        if state.refs.contains(ref_name) || state.hidden_refs.contains(ref_name) {
            return Ok(RefCreation::AlreadyExists);
        }
        state.refs.insert(ref_name.to_string());
        state
            .created_refs
            .push((ref_name.to_string(), sha.to_string()));
        if let Some(tag) = ref_name.strip_prefix("refs/tags/") {
            state.tags.push(tag.to_string());
        }
        Ok(RefCreation::Created)
    }

    async fn create_release(&self, release: &ReleaseRequest) -> Result<String> {
        let mut state = self.state();
        if state.fail_release {
            return Err(AutotagError::host("release creation rejected"));
        }
        state.releases.push(release.clone());
        Ok(format!("https://example.test/releases/{}", release.tag))
    }

    async fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        if self.state().fail_comments {
            return Err(AutotagError::host("comments unavailable"));
        }
        Ok(self.comments(number))
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<u64> {
        if self.state().fail_comments {
            return Err(AutotagError::host("comments unavailable"));
        }
        Ok(self.add_comment(number, body, "github-actions[bot]", true))
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_comments {
            return Err(AutotagError::host("comments unavailable"));
        }
        let comment = state
            .comments
            .iter_mut()
            .map(|(_, c)| c)
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AutotagError::host(format!("No comment {}", comment_id)))?;
        comment.body = body.to_string();
        Ok(())
    }
}
