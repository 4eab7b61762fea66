use crate::error::Result;
use git2::Repository;
use std::path::Path;

/// Read-only view of a local checkout.
///
/// Used by the `plan` command to preview the decision from local tags and
/// history without touching any remote.
pub struct LocalRepository {
    repo: Repository,
}

impl LocalRepository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(LocalRepository { repo })
    }

    /// Get all tag names in the repository
    pub fn tag_names(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(str::to_string).collect())
    }

    /// Whether `refs/tags/<tag_name>` exists
    pub fn tag_exists(&self, tag_name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .is_ok()
    }

    /// Commit messages reachable from HEAD but not from `since_tag`,
    /// oldest first.
    ///
    /// With no tag, every commit reachable from HEAD is returned.
    pub fn commit_messages_since(&self, since_tag: Option<&str>) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        if let Some(tag_name) = since_tag {
            // Peel handles both lightweight and annotated tags
            let tag_commit = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag_name))?
                .peel_to_commit()?;
            revwalk.hide(tag_commit.id())?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            messages.push(commit.message().unwrap_or_default().to_string());
        }

        messages.reverse();
        Ok(messages)
    }
}
