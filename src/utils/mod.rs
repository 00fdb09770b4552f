pub mod changelog;
pub mod changelog_manager;
pub mod config;
pub mod severity;

pub mod testing;
