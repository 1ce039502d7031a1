use scorecard_release::boundary::BoundaryWarning;
use scorecard_release::title::parse_title;
use scorecard_release::ui;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_unrecognized_title_display() {
    let warning = BoundaryWarning::UnrecognizedTitle {
        title: "Update things".to_string(),
        reason: "no owner/repo dependency name found".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("Update things"),
        "Message should contain the title, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("owner/repo"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_upstream_notes_display() {
    let warning = BoundaryWarning::UpstreamNotesUnavailable {
        repository: "ossf/scorecard-action".to_string(),
        tag: "v2.4.2".to_string(),
        reason: "release not found".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("ossf/scorecard-action@v2.4.2"));
    assert!(display_msg.contains("release not found"));
    assert!(display_msg.contains("fallback"));
}

#[test]
fn test_boundary_warning_no_release_tags_display() {
    let warning = BoundaryWarning::NoReleaseTags {
        seed: "v1.0.1".to_string(),
    };
    assert_eq!(warning.to_string(), "No release tags found, starting at v1.0.1");
}

// ============================================================================
// Title edge cases surfaced as warnings
// ============================================================================

#[test]
fn test_title_without_name_warns() {
    let parsed = parse_title("Bump from 1.0.0 to 1.0.1");
    assert!(matches!(
        parsed.warning(),
        Some(BoundaryWarning::UnrecognizedTitle { .. })
    ));
}

#[test]
fn test_canonical_title_has_no_warning() {
    assert!(parse_title("Bump slackapi/slack-github-action from v1.26.0 to v1.27.0")
        .warning()
        .is_none());
}

#[test]
fn test_display_boundary_warning_does_not_panic() {
    let warning = BoundaryWarning::NoReleaseTags {
        seed: "v1.0.1".to_string(),
    };
    ui::display_boundary_warning(&warning);
    warning.report();
}
