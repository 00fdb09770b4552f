use anyhow::{Context, Result};
use changelog_helper::{ChangelogManager, HelperConfig, display_issues};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "changelog-helper")]
#[command(version, about = "validate release versions against CHANGELOG.md and cut release notes", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// directory holding the changelog and config (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    /// changelog file, overrides the configured path
    #[arg(long, global = true)]
    changelog: Option<PathBuf>,

    /// configuration file (defaults to changelog-helper.toml in --path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    /// more logging on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// check that a version is exactly one increment above the latest release
    Validate {
        /// proposed version, e.g. 3.1.0
        version: String,
    },

    /// validate a version and add its heading below 'Unreleased'
    Update {
        /// new version, e.g. 3.1.0
        version: String,

        /// print the updated changelog instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// write release notes from the latest release (or 'Unreleased')
    ReleaseNotes {
        /// take the notes from the 'Unreleased' section
        #[arg(short, long)]
        unreleased: bool,

        /// output file, overrides the configured path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// print the notes instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// show the current version and the possible next versions
    Status,

    /// check the changelog structure
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manager = build_manager(&cli)?;

    match &cli.command {
        Commands::Validate { version } => handle_validate(&manager, &cli.format, version)?,
        Commands::Update { version, dry_run } => {
            handle_update(&manager, &cli.format, version, *dry_run)?
        }
        Commands::ReleaseNotes {
            unreleased,
            output,
            stdout,
        } => {
            let manager = match output {
                Some(output) => {
                    let config = manager
                        .config()
                        .clone()
                        .release_notes_path(resolve(&cli.path, output));
                    ChangelogManager::new(config)
                }
                None => manager,
            };
            handle_release_notes(&manager, &cli.format, *unreleased, *stdout)?
        }
        Commands::Status => handle_status(&manager, &cli.format)?,
        Commands::Check => handle_check(&manager, &cli.format)?,
    }

    Ok(())
}

/// stderr logging; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn build_manager(cli: &Cli) -> Result<ChangelogManager> {
    let config = match &cli.config {
        Some(path) => HelperConfig::load_from_file(resolve(&cli.path, path))
            .context("failed to load configuration")?,
        None => HelperConfig::load_or_default(&cli.path),
    };

    let changelog_path = resolve(
        &cli.path,
        cli.changelog
            .as_deref()
            .unwrap_or(config.changelog.changelog_path.as_path()),
    );
    let release_notes_path = resolve(&cli.path, &config.changelog.release_notes_path);
    let changelog = config
        .changelog
        .changelog_path(changelog_path)
        .release_notes_path(release_notes_path);

    debug!(
        changelog = %changelog.changelog_path.display(),
        release_notes = %changelog.release_notes_path.display(),
        "resolved paths"
    );
    Ok(ChangelogManager::new(changelog))
}

fn handle_validate(manager: &ChangelogManager, format: &OutputFormat, version: &str) -> Result<()> {
    let increment = manager.validate_version(version)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "version": version,
                "increment": increment,
                "valid": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!("{} is a valid {} release", version, increment);
        }
    }

    Ok(())
}

fn handle_update(
    manager: &ChangelogManager,
    format: &OutputFormat,
    version: &str,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let updated = manager.render_update(version)?;
        print!("{}", updated);
        return Ok(());
    }

    let increment = manager.update_changelog(version)?;

    let path = &manager.config().changelog_path;
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "version": version,
                "increment": increment,
                "label": manager.config().label_for(increment),
                "changelog": path,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!(
                "added {} ({}) to {}",
                version,
                manager.config().label_for(increment),
                path.display()
            );
        }
    }

    Ok(())
}

fn handle_release_notes(
    manager: &ChangelogManager,
    format: &OutputFormat,
    from_unreleased: bool,
    stdout: bool,
) -> Result<()> {
    let source = if from_unreleased {
        "unreleased"
    } else {
        "latest_release"
    };

    if stdout {
        let notes = manager.release_notes(from_unreleased)?;
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "source": source, "notes": notes });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Human => print!("{}", notes),
        }
        return Ok(());
    }

    let notes = manager.generate_release_notes(from_unreleased)?;
    let path = &manager.config().release_notes_path;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "source": source,
                "path": path,
                "lines": notes.lines().count(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            println!(
                "wrote {} line(s) of release notes to {}",
                notes.lines().count(),
                path.display()
            );
        }
    }

    Ok(())
}

fn handle_status(manager: &ChangelogManager, format: &OutputFormat) -> Result<()> {
    let status = manager.status()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Human => status.display(),
    }

    Ok(())
}

fn handle_check(manager: &ChangelogManager, format: &OutputFormat) -> Result<()> {
    let issues = manager.check()?;
    let errors = issues.iter().filter(|i| i.is_error()).count();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "changelog": manager.config().changelog_path,
                "errors": errors,
                "warnings": issues.len() - errors,
                "issues": issues,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => display_issues(&issues),
    }

    // return error to cause non-zero exit code
    if errors > 0 {
        anyhow::bail!("changelog check failed with {} error(s)", errors);
    }

    Ok(())
}
