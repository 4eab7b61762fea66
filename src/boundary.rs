use std::fmt;

/// Non-fatal conditions met while acting on a decision.
/// They are reported to the user but never fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// None of the existing tags parsed as a version; counting started at zero
    NoValidTags { tag_count: usize },
    /// The tag appeared between the existence check and the create call
    TagCreatedConcurrently { tag: String },
    /// The tag was created but the release object could not be
    ReleaseFailed { tag: String, reason: String },
    /// The status comment could not be posted or updated
    CommentFailed { reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoValidTags { tag_count } => {
                write!(
                    f,
                    "No valid version tags among {} existing tag(s); starting from 0.0.0",
                    tag_count
                )
            }
            BoundaryWarning::TagCreatedConcurrently { tag } => {
                write!(f, "Tag '{}' was created by another run; skipping", tag)
            }
            BoundaryWarning::ReleaseFailed { tag, reason } => {
                write!(
                    f,
                    "Tag '{}' was created but the release failed: {}",
                    tag, reason
                )
            }
            BoundaryWarning::CommentFailed { reason } => {
                write!(f, "Could not update the pull request comment: {}", reason)
            }
        }
    }
}
