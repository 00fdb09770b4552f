// integration tests for validating, updating and excerpting changelogs

use changelog_helper::utils::testing::{ChangelogScenario, TestChangelog, TestRelease};
use changelog_helper::{ChangelogManager, Error, IncrementType, IssueType};
use semver::Version;

#[test]
fn test_valid_increments_pass() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();

    assert_eq!(
        manager.validate_version("3.1.0").unwrap(),
        IncrementType::Minor
    );
    assert_eq!(
        manager.validate_version("4.0.0").unwrap(),
        IncrementType::Major
    );
    assert_eq!(
        manager.validate_version("3.0.1").unwrap(),
        IncrementType::Patch
    );
}

#[test]
fn test_validation_is_repeatable_and_read_only() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();
    let before = workdir.read_changelog();

    assert!(manager.validate_version("3.1.0").is_ok());
    assert!(manager.validate_version("3.1.0").is_ok());
    assert!(manager.validate_version("5.0.0").is_err());
    assert_eq!(workdir.read_changelog(), before);
}

#[test]
fn test_invalid_semver_message() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let err = workdir.manager().validate_version("pizza").unwrap_err();

    assert!(matches!(err, Error::InvalidVersion { .. }));
    assert_eq!(
        err.to_string(),
        "New version number pizza could not be processed by Semver. Please ensure you are providing a valid semantic version"
    );
}

#[test]
fn test_regression_message() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();

    let err = manager.validate_version("2.11.0").unwrap_err();
    assert_eq!(
        err.to_string(),
        "New version number 2.11.0 is less than or equal to the most recent version (3.0.0). Please provide a newer version number"
    );
    assert!(matches!(
        manager.validate_version("3.0.0"),
        Err(Error::VersionRegression { .. })
    ));
}

#[test]
fn test_skipped_increment_messages() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();

    let increments = [
        ("5.0.0", "major", "4.0.0"),
        ("3.2.0", "minor", "3.1.0"),
        ("3.0.2", "patch", "3.0.1"),
    ];

    for (bad, increment, good) in increments {
        let err = manager.validate_version(bad).unwrap_err();
        assert!(matches!(err, Error::InvalidIncrement { .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "New version number {} is incrementing more than one for its increment type ({}). Please provide a version number than only increments by one from the current version. In this case, it's likely that your new version number should be: {}",
                bad, increment, good
            )
        );
    }
}

#[test]
fn test_update_adds_feature_heading() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    workdir.manager().update_changelog("3.1.0").unwrap();

    let changelog = workdir.read_changelog();
    assert!(changelog.contains("## v3.1.0 (Feature release)"));

    // the pending fixes now sit under the new release
    let unreleased = changelog.find("## Unreleased").unwrap();
    let release = changelog.find("## v3.1.0").unwrap();
    let fixes = changelog.find("### Fixes").unwrap();
    let previous = changelog.find("## v3.0.0").unwrap();
    assert!(unreleased < release && release < fixes && fixes < previous);
    assert_eq!(changelog[unreleased..release].trim(), "## Unreleased");
}

#[test]
fn test_update_labels_by_increment() {
    for (version, heading) in [
        ("4.0.0", "## v4.0.0 (Breaking release)"),
        ("3.0.1", "## v3.0.1 (Fix release)"),
    ] {
        let workdir = ChangelogScenario::PendingFixes.build().unwrap();
        workdir.manager().update_changelog(version).unwrap();
        assert!(workdir.read_changelog().contains(heading));
    }
}

#[test]
fn test_update_moves_current_version() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();

    manager.update_changelog("3.1.0").unwrap();
    assert_eq!(manager.current_version().unwrap(), Version::new(3, 1, 0));

    // a second run with the same version is now a regression
    assert!(matches!(
        manager.update_changelog("3.1.0"),
        Err(Error::VersionRegression { .. })
    ));
    assert_eq!(workdir.read_changelog().matches("## v3.1.0").count(), 1);
}

#[test]
fn test_update_rejects_without_writing() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let before = workdir.read_changelog();

    assert!(workdir.manager().update_changelog("3.2.0").is_err());
    assert_eq!(workdir.read_changelog(), before);
}

#[test]
fn test_render_update_does_not_write() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let before = workdir.read_changelog();

    let rendered = workdir.manager().render_update("3.1.0").unwrap();
    assert!(rendered.contains("## v3.1.0 (Feature release)"));
    assert_eq!(workdir.read_changelog(), before);
}

#[test]
fn test_release_notes_from_unreleased() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    workdir.manager().generate_release_notes(true).unwrap();

    let notes = workdir.read_release_notes();
    assert!(notes.contains("Bing bong"));
    assert!(notes.contains("## Fixes"));
    assert!(!notes.contains("### Fixes"));
    assert!(!notes.contains("Removed the old thing"));
}

#[test]
fn test_release_notes_from_latest_release() {
    let workdir = ChangelogScenario::JustReleased.build().unwrap();
    let notes = workdir.manager().generate_release_notes(false).unwrap();

    assert_eq!(notes, "## Fixes\n\nBing bong\n");
    assert_eq!(workdir.read_release_notes(), notes);
}

#[test]
fn test_release_notes_skip_unreleased_body() {
    let workdir = TestChangelog::new()
        .unreleased("Not yet")
        .release(TestRelease::new("3.1.0").label("Feature release").line("Shipped"))
        .release(TestRelease::new("3.0.0").label("Breaking release"))
        .build()
        .unwrap();

    let notes = workdir.manager().generate_release_notes(false).unwrap();
    assert_eq!(notes, "Shipped\n");
}

#[test]
fn test_release_notes_shift_every_heading() {
    let workdir = TestChangelog::new()
        .unreleased("### Breaking changes")
        .unreleased("#### Removed X")
        .unreleased("### Fixes")
        .unreleased("#### Fixed Y")
        .release(TestRelease::new("1.0.0").label("Breaking release"))
        .build()
        .unwrap();

    let notes = workdir.manager().generate_release_notes(true).unwrap();
    assert_eq!(
        notes,
        "## Breaking changes\n\n### Removed X\n\n## Fixes\n\n### Fixed Y\n"
    );
}

#[test]
fn test_release_notes_overwrite() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    std::fs::write(workdir.release_notes_path(), "stale notes\n".repeat(20)).unwrap();

    workdir.manager().generate_release_notes(true).unwrap();
    assert!(!workdir.read_release_notes().contains("stale"));
}

#[test]
fn test_full_release_flow() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();

    let before = manager.release_notes(true).unwrap();
    manager.update_changelog("3.1.0").unwrap();
    let after = manager.generate_release_notes(false).unwrap();

    assert_eq!(before, after);
    assert_eq!(manager.release_notes(true).unwrap(), "");
}

#[test]
fn test_indented_changelog() {
    let workdir = ChangelogScenario::Indented.build().unwrap();
    let manager = workdir.manager();

    assert!(manager.validate_version("3.1.0").is_ok());
    manager.update_changelog("3.1.0").unwrap();
    assert!(
        workdir
            .read_changelog()
            .contains("    ## v3.1.0 (Feature release)")
    );

    let notes = manager.generate_release_notes(false).unwrap();
    assert!(notes.contains("## Fixes"));
    assert!(!notes.contains("### Fixes"));
    assert!(notes.contains("Bing bong"));
}

#[test]
fn test_changelog_without_releases() {
    let workdir = ChangelogScenario::NoReleases.build().unwrap();
    let manager = workdir.manager();

    let err = manager.validate_version("1.0.0").unwrap_err();
    assert!(matches!(err, Error::ChangelogError { .. }));
    assert!(manager.generate_release_notes(false).is_err());
    assert_eq!(manager.release_notes(true).unwrap(), "- first entry\n");
}

#[test]
fn test_missing_unreleased_heading() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    workdir
        .write_changelog("# Changelog\n\n## v1.0.0 (Breaking release)\n")
        .unwrap();
    let manager = workdir.manager();

    assert!(matches!(
        manager.update_changelog("1.1.0"),
        Err(Error::ChangelogError { .. })
    ));
    let issues = manager.check().unwrap();
    assert_eq!(issues[0].issue_type, IssueType::MissingUnreleased);
}

#[test]
fn test_status() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let status = workdir.manager().status().unwrap();

    assert_eq!(status.current_version, Version::new(3, 0, 0));
    assert_eq!(status.release_count, 2);
    assert_eq!(status.unreleased_entries, 2);
    assert!(status.has_unreleased_changes());
    assert_eq!(
        status.next_version(IncrementType::Minor),
        Some(&Version::new(3, 1, 0))
    );
}

#[test]
fn test_check_clean_changelog() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    assert!(workdir.manager().check().unwrap().is_empty());

    let workdir = ChangelogScenario::JustReleased.build().unwrap();
    let issues = workdir.manager().check().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].issue_type, IssueType::EmptyUnreleased);
    assert!(issues[0].is_warning());
}

#[test]
fn test_custom_labels() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let config = workdir
        .config()
        .label(IncrementType::Minor, "Minor release");

    ChangelogManager::new(config)
        .update_changelog("3.1.0")
        .unwrap();
    assert!(workdir.read_changelog().contains("## v3.1.0 (Minor release)"));
}

#[test]
fn test_build_metadata_is_not_a_newer_release() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let manager = workdir.manager();
    let before = workdir.read_changelog();

    let err = manager.update_changelog("3.0.0+build.5").unwrap_err();
    assert!(matches!(err, Error::VersionRegression { .. }));
    assert_eq!(workdir.read_changelog(), before);
}

#[test]
fn test_crlf_changelog_keeps_line_endings() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let crlf = workdir.read_changelog().replace('\n', "\r\n");
    workdir.write_changelog(&crlf).unwrap();

    assert_eq!(
        workdir.manager().update_changelog("3.0.1").unwrap(),
        IncrementType::Patch
    );

    let updated = workdir.read_changelog();
    assert!(updated.contains("## v3.0.1 (Fix release)\r\n"));
    assert!(updated.ends_with("\r\n"));
    assert_eq!(updated.matches('\n').count(), updated.matches("\r\n").count());
}

#[test]
fn test_status_at_max_major_version() {
    let workdir = TestChangelog::new()
        .unreleased("- fix")
        .release(TestRelease::new("18446744073709551615.0.0"))
        .build()
        .unwrap();

    let status = workdir.manager().status().unwrap();
    assert_eq!(status.current_version, Version::new(u64::MAX, 0, 0));
    assert!(
        !status
            .next_versions
            .iter()
            .any(|(increment, _)| *increment == IncrementType::Major)
    );
    assert_eq!(
        status.next_version(IncrementType::Patch),
        Some(&Version::new(u64::MAX, 0, 1))
    );
}

#[test]
fn test_custom_unreleased_title() {
    let workdir = ChangelogScenario::PendingFixes.build().unwrap();
    let renamed = workdir.read_changelog().replace("## Unreleased", "## Next");
    workdir.write_changelog(&renamed).unwrap();

    let manager = ChangelogManager::new(workdir.config().unreleased_title("Next"));
    manager.update_changelog("3.0.1").unwrap();

    let updated = workdir.read_changelog();
    let next = updated.find("## Next").unwrap();
    let release = updated.find("## v3.0.1 (Fix release)").unwrap();
    assert!(next < release);
}
