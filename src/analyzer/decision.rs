use crate::config::Config;
use crate::domain::{tag, BumpClassifier, Tag, Version, VersionBump};
use std::fmt;
use tracing::{debug, info};

/// Where the version being incremented came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// The highest valid version tag known to the host
    Tag(Tag),
    /// No valid version tags exist; counting starts from 0.0.0
    Zero { name: String },
}

impl Baseline {
    pub fn version(&self) -> Version {
        match self {
            Baseline::Tag(tag) => tag.version,
            Baseline::Zero { .. } => Version::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Baseline::Tag(tag) => &tag.name,
            Baseline::Zero { name } => name,
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Baseline::Tag(tag) => write!(f, "{}", tag.name),
            Baseline::Zero { name } => write!(f, "{} (baseline, no valid tags found)", name),
        }
    }
}

/// Why no tag will be created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoMatchingKeywords,
    TagAlreadyExists,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoMatchingKeywords => "no matching keywords",
            SkipReason::TagAlreadyExists => "tag already exists",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed next tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    pub bump: VersionBump,
    pub baseline: Baseline,
    pub next: Version,
    pub tag: String,
}

/// Outcome of a decision run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDecision {
    /// Create `plan.tag`
    Create(TagPlan),
    /// Do nothing. `plan` is present when a version was computed but its tag
    /// already exists.
    Skip {
        reason: SkipReason,
        plan: Option<TagPlan>,
    },
}

impl TagDecision {
    pub fn is_create(&self) -> bool {
        matches!(self, TagDecision::Create(_))
    }

    pub fn plan(&self) -> Option<&TagPlan> {
        match self {
            TagDecision::Create(plan) => Some(plan),
            TagDecision::Skip { plan, .. } => plan.as_ref(),
        }
    }

    pub fn bump(&self) -> VersionBump {
        self.plan().map(|p| p.bump).unwrap_or(VersionBump::None)
    }

    pub fn tag(&self) -> Option<&str> {
        self.plan().map(|p| p.tag.as_str())
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            TagDecision::Create(_) => None,
            TagDecision::Skip { reason, .. } => Some(*reason),
        }
    }

    pub fn exists_already(&self) -> bool {
        self.skip_reason() == Some(SkipReason::TagAlreadyExists)
    }

    /// Turn a planned creation into the idempotent no-op, keeping the plan
    pub fn into_already_exists(self) -> Self {
        match self {
            TagDecision::Create(plan) => TagDecision::Skip {
                reason: SkipReason::TagAlreadyExists,
                plan: Some(plan),
            },
            skip => skip,
        }
    }
}

/// Decides whether a new tag should be cut and which one
///
/// Pure and deterministic: identical inputs give identical decisions.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    classifier: BumpClassifier,
    v_prefix: bool,
}

impl DecisionEngine {
    pub fn new(classifier: BumpClassifier, v_prefix: bool) -> Self {
        DecisionEngine {
            classifier,
            v_prefix,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        DecisionEngine::new(
            BumpClassifier::new(&config.conventional_commits),
            config.v_prefix,
        )
    }

    /// Decide on the next tag
    ///
    /// # Arguments
    /// * `commits` - Raw commit messages of the change set
    /// * `existing_tags` - Every tag name known to the host; invalid names are ignored
    /// * `fallback` - Text (PR title and body) consulted only when no commit
    ///   message calls for a bump
    pub fn decide<C, T>(
        &self,
        commits: &[C],
        existing_tags: &[T],
        fallback: Option<&str>,
    ) -> TagDecision
    where
        C: AsRef<str>,
        T: AsRef<str>,
    {
        let bump = self.classifier.classify_with_fallback(commits, fallback);
        if !bump.is_release() {
            debug!("No bump keywords in {} commit(s)", commits.len());
            return TagDecision::Skip {
                reason: SkipReason::NoMatchingKeywords,
                plan: None,
            };
        }

        let baseline = match tag::latest(existing_tags) {
            Some(tag) => Baseline::Tag(tag),
            None => {
                let name = Version::ZERO.to_tag(self.v_prefix);
                info!(
                    "No valid version tags among {} tag(s); using {} as baseline",
                    existing_tags.len(),
                    name
                );
                Baseline::Zero { name }
            }
        };

        let next = baseline.version().bump(bump);
        TagDecision::Create(TagPlan {
            bump,
            next,
            tag: next.to_tag(self.v_prefix),
            baseline,
        })
    }

    /// Apply the host's answer to "does the planned tag already exist?"
    ///
    /// The existence check belongs to the caller because only the host knows
    /// about refs outside the listed tags (or created since they were listed).
    pub fn resolve_existing(&self, decision: TagDecision, exists_already: bool) -> TagDecision {
        if exists_already {
            if let Some(tag) = decision.tag() {
                info!("Tag {} already exists; nothing to do", tag);
            }
            decision.into_already_exists()
        } else {
            decision
        }
    }
}
