use report_core::classify::select_exportable;
use report_core::error::{ExportError, ExportResult};
use report_core::options::SUPPORTED_VERSIONS;
use report_core::report::ExportReport;
use report_core::scene::{Exporter, Scene};
use report_core::units::resolve_scale;
use std::path::Path;
use tracing::{info, warn};

pub mod export;
pub mod fbx;
pub mod location;
pub mod placeholder;
pub mod scope;

use crate::export::BlockExporter;
use crate::location::{resolve_location, FolderPicker, LocationMode};
use crate::scope::{RenameScope, SelectionScope};

pub const COMMAND_NAME: &str = "RePort";

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub mode: LocationMode,
    pub dry_run: bool,
    pub supported_versions: Vec<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: LocationMode::Batch,
            dry_run: false,
            supported_versions: SUPPORTED_VERSIONS.to_vec(),
        }
    }
}

/// Exports every exportable object of the active document.
///
/// Nothing in the scene is left changed: object names and the user's
/// selection are restored and all temporary geometry is deleted, whether or
/// not the run succeeds. Files already written stay on disk.
pub fn run<S: Scene>(
    scene: &mut S,
    exporter: &mut dyn Exporter,
    picker: &mut dyn FolderPicker,
    cfg: &ExportConfig,
) -> ExportResult<ExportReport> {
    let result = run_inner(scene, exporter, picker, cfg);
    match &result {
        Ok(_) => info!("{COMMAND_NAME}: success"),
        Err(err) if err.is_cancellation() => info!("{COMMAND_NAME}: {err} -> abort"),
        Err(err) => warn!("{COMMAND_NAME}: {err} -> abort"),
    }
    result
}

fn run_inner<S: Scene>(
    scene: &mut S,
    exporter: &mut dyn Exporter,
    picker: &mut dyn FolderPicker,
    cfg: &ExportConfig,
) -> ExportResult<ExportReport> {
    let doc = scene.document();
    if !cfg.supported_versions.contains(&doc.host_version) {
        return Err(ExportError::UnsupportedVersion {
            version: doc.host_version,
        });
    }
    let location = resolve_location(&doc, cfg.mode, picker, cfg.dry_run)?;
    let scale = resolve_scale(doc.unit_system);
    info!(
        "exporting {:?} to {:?} (scale {scale})",
        location.name, location.root
    );

    let mut selection = SelectionScope::new(scene);
    selection.unselect_all();
    let ids = select_exportable(&*selection);

    let mut names = RenameScope::new(&mut *selection);
    names.assign(&ids)?;
    names.select(&ids);

    let mut blocks = BlockExporter::new(exporter, &location.root, scale, doc.host_version)
        .dry_run(cfg.dry_run)
        .fresh_root(location.fresh);
    let exported = blocks.export_selection(&mut *names, Path::new(&location.name))?;

    let mut report = blocks.into_report();
    report.name = location.name;
    if !exported {
        report.warn("nothing_exported", "No exportable objects found.");
    }
    Ok(report)
}
