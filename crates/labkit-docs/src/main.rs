//! CLI entry point for labkit-docs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use labkit_core::config::Settings;
use labkit_core::layout;

use labkit_docs::config::DocsConfig;
use labkit_docs::files::{rewrite_files, Change, FileChange};
use labkit_docs::{prune, references, renumber, slides, titles};

#[derive(Parser)]
#[command(name = "labkit-docs")]
#[command(about = "Rewrite Neo4j course lab markdown and slide decks")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Compute changes without writing files.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Lab renumbering entry OLD=NEW (repeatable). Defaults to the course mapping.
    #[arg(long = "map", value_name = "OLD=NEW", global = true)]
    map: Vec<String>,

    /// Retired lab whose leftover references are removed (repeatable).
    #[arg(long = "retire", value_name = "N", global = true)]
    retire: Vec<u32>,

    #[arg(long, global = true)]
    labs_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    presentations_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file prefix (default: labkit).
    #[arg(short, long, default_value = "labkit", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Make lab headings match the number in each file name.
    FixTitles,
    /// Rename lab files and data scripts, then remap references.
    Renumber,
    /// Remap lab references in lab markdown.
    UpdateRefs,
    /// Remap lab references in slide decks.
    UpdatePresentationRefs,
    /// Number the lab introduction slide headings.
    NumberIntroSlides,
    /// Add the missing space after lab introduction headings.
    FixIntroSpacing,
    /// Remove retired GDS, Lab 7 and Lab 17 content from decks 1-3.
    PrunePresentations,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let config: DocsConfig = settings.section("docs")?;

    let labs_dir = dir_or(cli.labs_dir.take(), &config.labs_dir);
    let presentations_dir = dir_or(cli.presentations_dir.take(), &config.presentations_dir);
    let data_dir = dir_or(cli.data_dir.take(), &config.data_dir);

    let changes = match cli.command {
        Command::FixTitles => {
            let files = layout::lab_files(&labs_dir)?;
            rewrite_files(&files, cli.dry_run, |path, text| match layout::lab_number(path) {
                Some(n) => Ok(Some(titles::fix_titles(text, n))),
                None => {
                    tracing::warn!(file = %path.display(), "Could not extract lab number");
                    Ok(None)
                }
            })?
        }
        Command::Renumber => {
            let mapping = config.mapping(&cli.map, &cli.retire)?;
            print!("Mapping:\n{mapping}");
            let (renames, changes) =
                renumber::renumber(&labs_dir, &data_dir, &mapping, cli.dry_run)?;
            for rename in &renames {
                println!("{} → {}", file_name(&rename.from), file_name(&rename.to));
            }
            changes
        }
        Command::UpdateRefs => {
            let mapping = config.mapping(&cli.map, &cli.retire)?;
            let files = layout::lab_files(&labs_dir)?;
            rewrite_files(&files, cli.dry_run, |_, text| {
                Ok(Some(references::update_markdown_refs(text, &mapping)?))
            })?
        }
        Command::UpdatePresentationRefs => {
            let mapping = config.mapping(&cli.map, &cli.retire)?;
            let files = layout::presentation_files(&presentations_dir)?;
            rewrite_files(&files, cli.dry_run, |_, text| {
                Ok(Some(references::update_presentation_refs(text, &mapping)?))
            })?
        }
        Command::NumberIntroSlides => {
            let files = layout::presentation_files(&presentations_dir)?;
            rewrite_files(&files, cli.dry_run, |_, text| {
                Ok(Some(slides::number_intro_slides(text)))
            })?
        }
        Command::FixIntroSpacing => {
            let files = layout::presentation_files(&presentations_dir)?;
            rewrite_files(&files, cli.dry_run, |_, text| {
                Ok(Some(slides::fix_intro_spacing(text)))
            })?
        }
        Command::PrunePresentations => prune::prune_presentations(&presentations_dir, cli.dry_run)?,
    };

    print_changes(&changes, cli.dry_run);
    Ok(())
}

fn dir_or(flag: Option<PathBuf>, configured: &str) -> PathBuf {
    flag.unwrap_or_else(|| PathBuf::from(configured))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_changes(changes: &[FileChange], dry_run: bool) {
    for change in changes {
        println!("{change}");
    }
    let updated = changes.iter().filter(|c| c.change == Change::Updated).count();
    let verb = if dry_run { "would be updated" } else { "updated" };
    println!("{updated} of {} files {verb}", changes.len());
}
