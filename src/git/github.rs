//! GitHub REST API implementation of [RepositoryHost].

use crate::error::{AutotagError, Result};
use crate::git::{CommitInfo, IssueComment, RefCreation, ReleaseRequest, RepositoryHost};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

const PER_PAGE: u8 = 100;

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommentEntry {
    id: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<UserEntry>,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    login: String,
    #[serde(rename = "type", default)]
    kind: String,
}

impl From<CommentEntry> for IssueComment {
    fn from(entry: CommentEntry) -> Self {
        let (author, author_is_bot) = match entry.user {
            Some(user) => {
                let is_bot = user.kind.eq_ignore_ascii_case("bot");
                (user.login, is_bot)
            }
            None => (String::new(), false),
        };
        IssueComment {
            id: entry.id,
            body: entry.body.unwrap_or_default(),
            author,
            author_is_bot,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedComment {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct CreatedRelease {
    html_url: String,
}

/// GitHub-backed repository host
pub struct GitHubHost {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubHost {
    /// Create a host for `owner/repo` authenticated with `token`
    ///
    /// `api_url` overrides the API base (GitHub Enterprise Server).
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: &str,
        api_url: Option<&str>,
    ) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(AutotagError::missing_context(
                "GITHUB_TOKEN is not set or empty",
            ));
        }

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url {
            builder = builder.base_uri(url).map_err(|e| {
                AutotagError::config(format!("Invalid GitHub API URL '{}': {}", url, e))
            })?;
        }
        let client = builder
            .build()
            .map_err(|e| AutotagError::host(format!("Failed to create GitHub client: {}", e)))?;

        Ok(GitHubHost {
            client,
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    /// Split `owner/repo`
    pub fn parse_repo(repo_str: &str) -> Option<(String, String)> {
        let (owner, repo) = repo_str.trim().split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some((owner.to_string(), repo.to_string()))
    }

    fn route(&self, path: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, path)
    }

    /// Fetch every page of a list endpoint
    async fn get_all<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let route = self.route(path);
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let params = PageParams {
                per_page: PER_PAGE,
                page,
            };
            let batch: Vec<T> = self
                .client
                .get(&route, Some(&params))
                .await
                .map_err(|e| api_error(&route, e))?;

            let count = batch.len();
            items.extend(batch);
            debug!("{} page {}: {} item(s)", route, page, count);

            if count < usize::from(PER_PAGE) {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

/// `refs/tags/v1.0.0` -> `tags/v1.0.0`, the form the git refs API expects in paths
pub fn short_ref(ref_name: &str) -> &str {
    ref_name.strip_prefix("refs/").unwrap_or(ref_name)
}

/// Full ref name required by the create-ref API
pub fn full_ref(ref_name: &str) -> String {
    if ref_name.starts_with("refs/") {
        ref_name.to_string()
    } else {
        format!("refs/{}", ref_name)
    }
}

fn github_message_contains(error: &octocrab::Error, needle: &str) -> bool {
    matches!(error, octocrab::Error::GitHub { source, .. } if source.message.contains(needle))
}

fn api_error(route: &str, error: octocrab::Error) -> AutotagError {
    AutotagError::host(format!("{}: {}", route, error))
}

#[async_trait]
impl RepositoryHost for GitHubHost {
    async fn list_tags(&self) -> Result<Vec<String>> {
        let tags: Vec<TagEntry> = self.get_all("tags").await?;
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn commit_message(&self, reference: &str) -> Result<String> {
        let route = self.route(&format!("commits/{}", reference));
        let commit: CommitEntry = self
            .client
            .get(&route, None::<&()>)
            .await
            .map_err(|e| api_error(&route, e))?;
        Ok(commit.commit.message)
    }

    async fn pull_request_commits(&self, number: u64) -> Result<Vec<CommitInfo>> {
        let commits: Vec<CommitEntry> = self.get_all(&format!("pulls/{}/commits", number)).await?;
        Ok(commits
            .into_iter()
            .map(|c| CommitInfo::new(c.sha, c.commit.message))
            .collect())
    }

    async fn ref_exists(&self, ref_name: &str) -> Result<bool> {
        let route = self.route(&format!("git/ref/{}", short_ref(ref_name)));
        let response: octocrab::Result<serde_json::Value> =
            self.client.get(&route, None::<&()>).await;
        match response {
            Ok(_) => Ok(true),
            Err(e) if github_message_contains(&e, "Not Found") => Ok(false),
            Err(e) => Err(api_error(&route, e)),
        }
    }

    async fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation> {
        let route = self.route("git/refs");
        let body = json!({ "ref": full_ref(ref_name), "sha": sha });
        let response: octocrab::Result<serde_json::Value> =
            self.client.post(&route, Some(&body)).await;
        match response {
            Ok(_) => {
                info!("Created {} at {}", ref_name, sha);
                Ok(RefCreation::Created)
            }
            Err(e) if github_message_contains(&e, "Reference already exists") => {
                Ok(RefCreation::AlreadyExists)
            }
            Err(e) => Err(api_error(&route, e)),
        }
    }

    async fn create_release(&self, release: &ReleaseRequest) -> Result<String> {
        let route = self.route("releases");
        let body = json!({
            "tag_name": release.tag,
            "name": release.name,
            "generate_release_notes": release.generate_release_notes,
            "make_latest": if release.make_latest { "true" } else { "false" },
        });
        let created: CreatedRelease = self
            .client
            .post(&route, Some(&body))
            .await
            .map_err(|e| api_error(&route, e))?;
        Ok(created.html_url)
    }

    async fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        let comments: Vec<CommentEntry> =
            self.get_all(&format!("issues/{}/comments", number)).await?;
        Ok(comments.into_iter().map(IssueComment::from).collect())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<u64> {
        let route = self.route(&format!("issues/{}/comments", number));
        let created: CreatedComment = self
            .client
            .post(&route, Some(&json!({ "body": body })))
            .await
            .map_err(|e| api_error(&route, e))?;
        Ok(created.id)
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        let route = self.route(&format!("issues/comments/{}", comment_id));
        let _updated: serde_json::Value = self
            .client
            .patch(&route, Some(&json!({ "body": body })))
            .await
            .map_err(|e| api_error(&route, e))?;
        Ok(())
    }
}
