use crate::config::ConventionalCommitsConfig;
use crate::domain::VersionBump;
use regex::Regex;
use std::sync::LazyLock;

/// `type(scope)!: description`, anchored on the header line. The whitespace
/// after the colon is mandatory.
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z][a-z0-9_-]*)(?:\(([^()\r\n]+)\))?(!)?:\s+(.*)$")
        .expect("header pattern is a valid regex")
});

/// Breaking-change footer, allowed on any line of the message.
static BREAKING_FOOTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*breaking[ -]changes?:?").expect("footer pattern is a valid regex")
});

/// Parsed header of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub is_breaking_change: bool,
}

impl ParsedCommit {
    /// Parse a commit message according to conventional commits
    ///
    /// Only the first line is considered for the header. Supports:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// Returns `None` for anything else, including `feat something` with no
    /// colon. `is_breaking_change` also reflects a breaking-change footer
    /// anywhere in the message.
    pub fn parse(message: &str) -> Option<Self> {
        let header = header_line(message);
        let captures = HEADER_PATTERN.captures(header)?;

        let r#type = captures.get(1)?.as_str().to_lowercase();
        let scope = captures.get(2).map(|m| m.as_str().to_string());
        let has_exclamation = captures.get(3).is_some();
        let description = captures
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        Some(ParsedCommit {
            r#type,
            scope,
            description,
            is_breaking_change: has_exclamation || has_breaking_footer(message),
        })
    }
}

fn header_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// Whether any line of `text` is a breaking-change footer
pub fn has_breaking_footer(text: &str) -> bool {
    BREAKING_FOOTER_PATTERN.is_match(text)
}

/// Classifies commit text into the version bump it calls for
///
/// Precedence is strict: major beats minor beats patch beats none. A header
/// with `!` or a breaking-change footer anywhere is major; otherwise the
/// header type decides via the configured minor and patch type lists.
#[derive(Debug, Clone)]
pub struct BumpClassifier {
    minor_types: Vec<String>,
    patch_types: Vec<String>,
}

impl BumpClassifier {
    pub fn new(config: &ConventionalCommitsConfig) -> Self {
        let normalize = |types: &[String]| -> Vec<String> {
            types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        };

        BumpClassifier {
            minor_types: normalize(&config.minor_types),
            patch_types: normalize(&config.patch_types),
        }
    }

    /// Classify a single unit of text (one commit message, or a PR title
    /// followed by its body)
    pub fn classify_message(&self, message: &str) -> VersionBump {
        if has_breaking_footer(message) {
            return VersionBump::Major;
        }

        let Some(parsed) = ParsedCommit::parse(message) else {
            return VersionBump::None;
        };

        if parsed.is_breaking_change {
            VersionBump::Major
        } else if self.minor_types.contains(&parsed.r#type) {
            VersionBump::Minor
        } else if self.patch_types.contains(&parsed.r#type) {
            VersionBump::Patch
        } else {
            VersionBump::None
        }
    }

    /// Classify a whole corpus of commit messages
    ///
    /// The corpus is judged as a whole: the strongest bump of any message wins.
    pub fn classify<S: AsRef<str>>(&self, messages: &[S]) -> VersionBump {
        let mut bump = VersionBump::None;
        for message in messages {
            bump = bump.max(self.classify_message(message.as_ref()));
            if bump == VersionBump::Major {
                break;
            }
        }
        bump
    }

    /// Classify the corpus, consulting `fallback` only when the corpus yields
    /// no bump at all
    pub fn classify_with_fallback<S: AsRef<str>>(
        &self,
        messages: &[S],
        fallback: Option<&str>,
    ) -> VersionBump {
        match self.classify(messages) {
            VersionBump::None => fallback
                .map(|text| self.classify_message(text))
                .unwrap_or(VersionBump::None),
            bump => bump,
        }
    }
}

impl Default for BumpClassifier {
    fn default() -> Self {
        BumpClassifier::new(&ConventionalCommitsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(message: &str) -> VersionBump {
        BumpClassifier::default().classify_message(message)
    }

    #[test]
    fn test_parse_with_scope() {
        let commit = ParsedCommit::parse("feat(auth): add login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.description, "add login");
        assert!(!commit.is_breaking_change);
    }

    #[test]
    fn test_parse_with_breaking_marker() {
        let commit = ParsedCommit::parse("feat(auth)!: redesign login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert!(commit.is_breaking_change);
    }

    #[test]
    fn test_parse_uppercase_type_is_lowered() {
        let commit = ParsedCommit::parse("FIX: crash on start").unwrap();
        assert_eq!(commit.r#type, "fix");
    }

    #[test]
    fn test_parse_non_conventional() {
        assert_eq!(ParsedCommit::parse("Random commit message"), None);
        assert_eq!(ParsedCommit::parse("feat something"), None);
        assert_eq!(ParsedCommit::parse("feat:no space"), None);
        assert_eq!(ParsedCommit::parse(""), None);
        assert_eq!(ParsedCommit::parse("  feat: indented"), None);
    }

    #[test]
    fn test_parse_only_reads_header_line() {
        assert_eq!(ParsedCommit::parse("Update docs\n\nfix: typo"), None);
    }

    #[test]
    fn test_classify_major() {
        assert_eq!(classify("feat!: x"), VersionBump::Major);
        assert_eq!(classify("feat(scope)!: x"), VersionBump::Major);
        assert_eq!(classify("MAJOR!: breaking change"), VersionBump::Major);
        assert_eq!(classify("chore(deps)!: drop node 16"), VersionBump::Major);
    }

    #[test]
    fn test_classify_breaking_footer() {
        assert_eq!(classify("feat: x\nBreaking changes: y"), VersionBump::Major);
        assert_eq!(
            classify("fix: rename field\n\nBREAKING CHANGE: field renamed"),
            VersionBump::Major
        );
        assert_eq!(
            classify("docs: notes\n\n  breaking-change: old flag removed"),
            VersionBump::Major
        );
        // the footer does not depend on the header type
        assert_eq!(
            classify("Update things\n\nBREAKING CHANGE removed api"),
            VersionBump::Major
        );
    }

    #[test]
    fn test_classify_minor() {
        assert_eq!(classify("feat: x"), VersionBump::Minor);
        assert_eq!(classify("Feat(ui): dark mode"), VersionBump::Minor);
    }

    #[test]
    fn test_classify_patch() {
        assert_eq!(classify("fix(scope): x"), VersionBump::Patch);
        assert_eq!(classify("fix: x"), VersionBump::Patch);
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify("docs: x"), VersionBump::None);
        assert_eq!(classify("feat something"), VersionBump::None);
        assert_eq!(classify("Fixed the fix for the prefix"), VersionBump::None);
        assert_eq!(classify("refactor: cleanup"), VersionBump::None);
        assert_eq!(classify(""), VersionBump::None);
    }

    #[test]
    fn test_classify_indented_header_is_none() {
        assert_eq!(classify("  feat: x"), VersionBump::None);
        assert_eq!(classify("\tfix: x"), VersionBump::None);
        assert_eq!(classify(" feat!: x"), VersionBump::None);
        // the footer may still be indented
        assert_eq!(classify("docs: x\n\n  BREAKING CHANGE: y"), VersionBump::Major);
    }

    #[test]
    fn test_classify_corpus_precedence() {
        let classifier = BumpClassifier::default();
        assert_eq!(
            classifier.classify(&["fix: a", "feat: b", "docs: c"]),
            VersionBump::Minor
        );
        assert_eq!(
            classifier.classify(&["fix: a", "feat(api)!: b"]),
            VersionBump::Major
        );
        assert_eq!(classifier.classify(&["fix: a", "chore: b"]), VersionBump::Patch);
        assert_eq!(classifier.classify::<&str>(&[]), VersionBump::None);
    }

    #[test]
    fn test_classify_never_defaults_to_patch() {
        let classifier = BumpClassifier::default();
        let messages = vec![
            "Updated stuff".to_string(),
            "Merge branch 'main' into topic".to_string(),
            "docs: readme".to_string(),
        ];
        assert_eq!(classifier.classify(&messages), VersionBump::None);
    }

    #[test]
    fn test_fallback_only_used_when_corpus_is_silent() {
        let classifier = BumpClassifier::default();
        assert_eq!(
            classifier.classify_with_fallback(&["docs: readme"], Some("feat: new api\n\nbody")),
            VersionBump::Minor
        );
        assert_eq!(
            classifier.classify_with_fallback(&["fix: a"], Some("feat!: title")),
            VersionBump::Patch
        );
        assert_eq!(
            classifier.classify_with_fallback(&["docs: readme"], None),
            VersionBump::None
        );
    }

    #[test]
    fn test_custom_types() {
        let config = ConventionalCommitsConfig {
            minor_types: vec!["feat".to_string(), "Feature".to_string()],
            patch_types: vec!["fix".to_string(), "perf".to_string()],
        };
        let classifier = BumpClassifier::new(&config);
        assert_eq!(classifier.classify_message("feature: x"), VersionBump::Minor);
        assert_eq!(classifier.classify_message("perf: x"), VersionBump::Patch);
        assert_eq!(classifier.classify_message("docs: x"), VersionBump::None);
    }
}
