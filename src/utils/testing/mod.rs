// testing utilities for generating changelog fixtures

pub mod changelog_builder;
pub mod scenarios;

pub use changelog_builder::{TestChangelog, TestRelease, TestWorkdir};
pub use scenarios::ChangelogScenario;
