use report_core::error::{ExportError, ExportResult};
use report_core::model::DocumentInfo;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMode {
    /// Export next to the document into a folder named after it, replacing
    /// any previous export.
    #[default]
    Batch,
    /// Ask for the root folder.
    Interactive,
}

/// Chooses a root folder in interactive mode. `None` means the user cancelled.
pub trait FolderPicker {
    fn pick_folder(&mut self, start: &Path) -> Option<PathBuf>;
}

/// Picker for batch runs; always cancels.
pub struct NoPicker;

impl FolderPicker for NoPicker {
    fn pick_folder(&mut self, _start: &Path) -> Option<PathBuf> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLocation {
    pub root: PathBuf,
    /// Document name without extension, the file prefix at the top level.
    pub name: String,
    /// The root is emptied before exporting, so nothing already inside it
    /// counts.
    pub fresh: bool,
}

/// Document path and name with the document extension removed.
pub fn document_stem(doc: &DocumentInfo) -> ExportResult<(PathBuf, String)> {
    let (Some(path), Some(name)) = (&doc.path, &doc.name) else {
        return Err(ExportError::NoSaveLocation);
    };
    let name = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or(ExportError::NoSaveLocation)?;
    Ok((path.with_extension(""), name.to_string()))
}

pub fn resolve_location(
    doc: &DocumentInfo,
    mode: LocationMode,
    picker: &mut dyn FolderPicker,
    dry_run: bool,
) -> ExportResult<ExportLocation> {
    let (default_root, name) = document_stem(doc)?;
    let (root, fresh) = match mode {
        LocationMode::Interactive => {
            let start = default_root.parent().unwrap_or(Path::new("."));
            let root = picker.pick_folder(start).ok_or(ExportError::UserCancelled)?;
            (root, false)
        }
        LocationMode::Batch => {
            if !dry_run {
                reset_dir(&default_root)?;
            }
            (default_root, true)
        }
    };
    Ok(ExportLocation { root, name, fresh })
}

fn reset_dir(dir: &Path) -> ExportResult<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => debug!("removed previous export {dir:?}"),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(ExportError::io(dir, err)),
    }
    std::fs::create_dir_all(dir).map_err(|err| ExportError::io(dir, err))
}
