// pre-defined changelog scenarios

use super::changelog_builder::{TestChangelog, TestRelease, TestWorkdir};

/// pre-defined test scenarios
pub enum ChangelogScenario {
    /// fixes waiting under `Unreleased`, latest release 3.0.0
    PendingFixes,
    /// 3.1.0 was just released, `Unreleased` is empty
    JustReleased,
    /// the pending-fixes changelog with every line indented
    Indented,
    /// nothing released yet
    NoReleases,
}

impl ChangelogScenario {
    /// build a workdir from a predefined scenario
    pub fn build(self) -> Result<TestWorkdir, Box<dyn std::error::Error>> {
        match self {
            ChangelogScenario::PendingFixes => Self::pending_fixes().build(),
            ChangelogScenario::JustReleased => TestChangelog::new()
                .title("Changelog")
                .release(
                    TestRelease::new("3.1.0")
                        .label("Feature release")
                        .line("### Fixes")
                        .line("Bing bong"),
                )
                .release(TestRelease::new("3.0.0").label("Breaking release"))
                .build(),
            ChangelogScenario::Indented => Self::pending_fixes().indent("    ").build(),
            ChangelogScenario::NoReleases => TestChangelog::new()
                .title("Changelog")
                .unreleased("- first entry")
                .build(),
        }
    }

    /// fixes under `Unreleased` above 3.0.0 and 2.11.0
    fn pending_fixes() -> TestChangelog {
        TestChangelog::new()
            .title("Changelog")
            .unreleased("### Fixes")
            .unreleased("Bing bong")
            .release(
                TestRelease::new("3.0.0")
                    .label("Breaking release")
                    .line("### Breaking changes")
                    .line("Removed the old thing"),
            )
            .release(TestRelease::new("2.11.0").label("Feature release"))
    }
}
