//! Pure formatting functions for terminal output.
//!
//! Status lines go to stdout, errors and warnings to stderr. `console` drops
//! the styling when the stream is not a terminal, which keeps CI logs clean.

use crate::analyzer::TagDecision;
use crate::boundary::BoundaryWarning;
use console::style;

const SHOWN_COMMITS: usize = 10;
const SUBJECT_WIDTH: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a non-fatal warning in yellow.
pub fn display_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// First line of a commit message, cut to fit one terminal line
pub fn commit_subject(message: &str) -> String {
    let subject = message.lines().next().unwrap_or_default();
    if subject.chars().count() > SUBJECT_WIDTH {
        let cut: String = subject.chars().take(SUBJECT_WIDTH).collect();
        format!("{}…", cut)
    } else {
        subject.to_string()
    }
}

/// Display the commits a decision was made from.
///
/// Shows up to ten subjects and the count of the rest.
pub fn display_commit_analysis<S: AsRef<str>>(commit_messages: &[S], source: &str) {
    println!("\n{}", style(format!("Analyzing commits {}", source)).bold());
    println!(
        "{}",
        style(format!("{} commit(s):", commit_messages.len())).underlined()
    );

    for (i, message) in commit_messages.iter().take(SHOWN_COMMITS).enumerate() {
        println!("  {}. {}", i + 1, commit_subject(message.as_ref()));
    }

    if commit_messages.len() > SHOWN_COMMITS {
        println!(
            "  ... and {} more commits",
            commit_messages.len() - SHOWN_COMMITS
        );
    }
}

/// One-line summary of a decision
pub fn describe_decision(decision: &TagDecision) -> String {
    match (decision.plan(), decision.skip_reason()) {
        (Some(plan), None) => format!(
            "{} bump: {} -> {}",
            plan.bump, plan.baseline, plan.tag
        ),
        (Some(plan), Some(reason)) => format!("{} ({}), skipping", plan.tag, reason),
        (None, Some(reason)) => format!("No tag: {}", reason),
        (None, None) => "No tag".to_string(),
    }
}

/// Display the decision, with the proposed tag change when there is one.
pub fn display_decision(decision: &TagDecision) {
    match decision.plan() {
        Some(plan) if decision.is_create() => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(&plan.baseline).red());
            println!("  To:   {}", style(&plan.tag).green());
            println!("  Bump: {}", plan.bump);
        }
        _ => display_status(&describe_decision(decision)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DecisionEngine;
    use crate::domain::BumpClassifier;

    #[test]
    fn test_commit_subject() {
        assert_eq!(commit_subject("fix: a\n\nbody"), "fix: a");
        assert_eq!(commit_subject(""), "");

        let long = format!("feat: {}", "é".repeat(80));
        let subject = commit_subject(&long);
        assert_eq!(subject.chars().count(), SUBJECT_WIDTH + 1);
        assert!(subject.ends_with('…'));
    }

    #[test]
    fn test_describe_decision() {
        let engine = DecisionEngine::new(BumpClassifier::default(), true);

        let create = engine.decide(&["fix: x"], &["v1.0.0"], None);
        assert_eq!(describe_decision(&create), "patch bump: v1.0.0 -> v1.0.1");

        let exists = create.into_already_exists();
        assert_eq!(
            describe_decision(&exists),
            "v1.0.1 (tag already exists), skipping"
        );

        let none = engine.decide(&["docs: x"], &["v1.0.0"], None);
        assert_eq!(describe_decision(&none), "No tag: no matching keywords");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_warning(&BoundaryWarning::CommentFailed {
            reason: "offline".to_string(),
        });
        display_commit_analysis(&["fix: a"; 12], "in test");
    }
}
