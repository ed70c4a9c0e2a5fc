use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use report_core::error::ExportError;
use report_core::memory::{MemoryScene, SceneDocument};
use report_export::fbx::FbxWriter;
use report_export::location::{FolderPicker, LocationMode};
use report_export::{ExportConfig, COMMAND_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "report")]
#[command(about = "Export a scene as a tree of FBX files with block and light placeholders.")]
struct Cli {
    /// Log debug output.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Export {
        scene: PathBuf,
        /// Choose the export folder instead of replacing the folder next to
        /// the scene.
        #[arg(long)]
        interactive: bool,
        /// Report what would be written without writing anything.
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Export {
            scene,
            interactive,
            dry_run,
            report,
        } => export(&scene, interactive, dry_run, report.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

struct DialogPicker;

impl FolderPicker for DialogPicker {
    fn pick_folder(&mut self, start: &Path) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title(COMMAND_NAME)
            .set_directory(start)
            .pick_folder()
    }
}

fn export(input: &Path, interactive: bool, dry_run: bool, report: Option<&Path>) -> Result<()> {
    ensure_input_file(input)?;
    let mut scene = load_scene(input)?;

    let cfg = ExportConfig {
        mode: if interactive {
            LocationMode::Interactive
        } else {
            LocationMode::Batch
        },
        dry_run,
        ..ExportConfig::default()
    };

    let mut writer = FbxWriter::new();
    let report_data = match report_export::run(&mut scene, &mut writer, &mut DialogPicker, &cfg) {
        Ok(report_data) => report_data,
        Err(ExportError::UserCancelled) => {
            eprintln!("{COMMAND_NAME}: no export location -> abort");
            return Ok(());
        }
        Err(err) => return Err(err).context(format!("{COMMAND_NAME}: export {input:?}")),
    };

    let json = serde_json::to_string_pretty(&report_data).context("serialize report")?;
    if let Some(path) = report {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        std::fs::write(path, &json).with_context(|| format!("write report: {path:?}"))?;
    } else {
        println!("{json}");
    }
    Ok(())
}

/// A document that does not record where it was saved is treated as saved at
/// the file it was loaded from.
fn load_scene(path: &Path) -> Result<MemoryScene> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read scene: {path:?}"))?;
    let mut doc: SceneDocument =
        serde_json::from_str(&text).with_context(|| format!("parse scene: {path:?}"))?;
    if doc.document.path.is_none() {
        doc.document.path = Some(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()));
    }
    if doc.document.name.is_none() {
        doc.document.name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }
    Ok(MemoryScene::from_document(doc))
}

fn ensure_input_file(input: &Path) -> Result<()> {
    match std::fs::metadata(input) {
        Ok(meta) => {
            if meta.is_file() {
                Ok(())
            } else {
                bail!("input is not a file: {input:?}");
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            bail!("input not found: {input:?} (cwd: {cwd:?}).");
        }
        Err(err) => Err(err).with_context(|| format!("stat input: {input:?}")),
    }
}
