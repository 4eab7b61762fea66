use pr_autotag::boundary::BoundaryWarning;
use pr_autotag::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_valid_tags_display() {
    let warning = BoundaryWarning::NoValidTags { tag_count: 3 };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("3 existing tag(s)"),
        "Message should contain the tag count, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("0.0.0"),
        "Message should name the zero baseline, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_concurrent_tag_display() {
    let warning = BoundaryWarning::TagCreatedConcurrently {
        tag: "v1.4.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("'v1.4.0'"),
        "Message should contain the tag, got: {}",
        display_msg
    );
    assert!(display_msg.contains("another run"));
}

#[test]
fn test_boundary_warning_release_failed_display() {
    let warning = BoundaryWarning::ReleaseFailed {
        tag: "v2.0.0".to_string(),
        reason: "403 Forbidden".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("'v2.0.0' was created"));
    assert!(
        display_msg.contains("403 Forbidden"),
        "Message should carry the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_comment_failed_display() {
    let warning = BoundaryWarning::CommentFailed {
        reason: "rate limited".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Could not update the pull request comment: rate limited"
    );
}

// ============================================================================
// UI Display Tests
// ============================================================================

#[test]
fn test_display_warning_does_not_panic() {
    ui::display_warning(&BoundaryWarning::NoValidTags { tag_count: 0 });
    ui::display_warning(&BoundaryWarning::TagCreatedConcurrently {
        tag: "v0.0.1".to_string(),
    });
}
