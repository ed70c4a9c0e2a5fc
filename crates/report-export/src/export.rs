use crate::placeholder::{encode_block_instance, encode_light};
use crate::scope::{SelectionScope, TransientScope};
use report_core::classify::{classify, ExportClass};
use report_core::error::{ExportError, ExportResult};
use report_core::geom::Vec3;
use report_core::model::ObjectId;
use report_core::naming::{assign_unique_name, block_token, sanitize_token, NameMap};
use report_core::options::{export_suffix, DetailLevel, ExportOptions};
use report_core::report::{BlockOutcome, BlockReport, ExportReport};
use report_core::scene::{Exporter, Scene};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Recursive export of the selected objects into a tree of files under one
/// root directory.
///
/// Each block definition is exported once per run, into
/// `<root>/<block>/<block>.*`, whatever depth it is referenced from. Every
/// instance becomes a placeholder in its parent's `.places` file.
pub struct BlockExporter<'e> {
    exporter: &'e mut dyn Exporter,
    root: PathBuf,
    scale: f64,
    version: u32,
    dry_run: bool,
    fresh_root: bool,
    /// Directories a dry run would have created.
    planned_dirs: HashSet<PathBuf>,
    /// Finished definitions and whether they produced any export.
    finished: HashMap<String, bool>,
    in_progress: Vec<String>,
    report: ExportReport,
}

impl<'e> BlockExporter<'e> {
    pub fn new(exporter: &'e mut dyn Exporter, root: &Path, scale: f64, version: u32) -> Self {
        Self {
            exporter,
            root: root.to_path_buf(),
            scale,
            version,
            dry_run: false,
            fresh_root: false,
            planned_dirs: HashSet::new(),
            finished: HashMap::new(),
            in_progress: Vec::new(),
            report: ExportReport {
                root: root.to_path_buf(),
                scale,
                ..ExportReport::default()
            },
        }
    }

    /// Plan only: no directories are created and the exporter is never
    /// called, but the report lists everything that would be written.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self.report.dry_run = dry_run;
        self
    }

    /// The root is known to be empty when the run starts. A dry run then
    /// plans without looking at what is currently on disk.
    pub fn fresh_root(mut self, fresh: bool) -> Self {
        self.fresh_root = fresh;
        self
    }

    pub fn into_report(self) -> ExportReport {
        self.report
    }

    /// Exports the scene's current selection with file names starting at
    /// `prefix` (relative to the root). The selection is restored afterwards.
    /// Returns whether any file was produced.
    pub fn export_selection<S: Scene>(&mut self, scene: &mut S, prefix: &Path) -> ExportResult<bool> {
        let mut scene = SelectionScope::new(scene);
        let selected = scene.saved().to_vec();
        scene.unselect_all();

        let mut exported = false;
        exported |= self.export_lights(&mut *scene, prefix, &selected)?;
        exported |= self.export_meshes(&mut *scene, prefix, &selected)?;
        exported |= self.export_details(&mut *scene, prefix, &selected)?;
        exported |= self.export_blocks(&mut *scene, prefix, &selected)?;
        Ok(exported)
    }

    // Lights go first and alone: mixed with other geometry the host loses
    // their shape and orientation.
    fn export_lights<S: Scene>(&mut self, scene: &mut S, prefix: &Path, selected: &[ObjectId]) -> ExportResult<bool> {
        let lights = of_class(scene, selected, ExportClass::Lights);
        let mut placeholders = TransientScope::new(scene);
        for id in lights {
            if let Some(placeholder) = encode_light(&*placeholders, id, self.scale)? {
                let pid = placeholder.insert(&mut *placeholders)?;
                placeholders.track(pid);
            }
        }
        if placeholders.is_empty() {
            return Ok(false);
        }
        let ids = placeholders.ids().to_vec();
        self.export_file(&mut *placeholders, &ids, prefix, "lights", None)?;
        self.report.light_placeholders += ids.len();
        placeholders.release()?;
        Ok(true)
    }

    fn export_meshes<S: Scene>(&mut self, scene: &mut S, prefix: &Path, selected: &[ObjectId]) -> ExportResult<bool> {
        let meshes = of_class(scene, selected, ExportClass::Meshes);
        if meshes.is_empty() {
            return Ok(false);
        }
        self.export_file(scene, &meshes, prefix, "meshes", None)?;
        Ok(true)
    }

    fn export_details<S: Scene>(&mut self, scene: &mut S, prefix: &Path, selected: &[ObjectId]) -> ExportResult<bool> {
        let surfaces = of_class(scene, selected, ExportClass::DetailSurfaces);
        if surfaces.is_empty() {
            return Ok(false);
        }
        for level in DetailLevel::ALL {
            let tag = format!("meshes{}", level.index());
            self.export_file(scene, &surfaces, prefix, &tag, Some(level))?;
        }
        Ok(true)
    }

    fn export_blocks<S: Scene>(&mut self, scene: &mut S, prefix: &Path, selected: &[ObjectId]) -> ExportResult<bool> {
        let instances = of_class(scene, selected, ExportClass::BlockInstances);
        let mut placeholders = TransientScope::new(scene);
        for id in instances {
            let definition = placeholders.instance(id)?.definition;
            if !self.export_block(&mut *placeholders, &definition)? {
                continue;
            }
            let placeholder = encode_block_instance(&*placeholders, id, self.scale)?;
            let pid = placeholder.insert(&mut *placeholders)?;
            placeholders.track(pid);
        }
        if placeholders.is_empty() {
            return Ok(false);
        }
        let ids = placeholders.ids().to_vec();
        self.export_file(&mut *placeholders, &ids, prefix, "places", None)?;
        self.report.block_placeholders += ids.len();
        placeholders.release()?;
        Ok(true)
    }

    /// Makes sure `definition` is exported into its own directory. Returns
    /// whether the definition has any exported content.
    fn export_block<S: Scene>(&mut self, scene: &mut S, definition: &str) -> ExportResult<bool> {
        if let Some(&done) = self.finished.get(definition) {
            debug!("block {definition:?} already handled");
            if let Some(block) = self.report.blocks.iter_mut().find(|b| b.name == definition) {
                block.instances += 1;
            }
            return Ok(done);
        }
        if self.in_progress.iter().any(|name| name == definition) {
            return Err(ExportError::CyclicBlock {
                name: definition.to_string(),
            });
        }

        let safe_name = block_token(definition);
        if sanitize_token(definition).is_empty() {
            warn!("block {definition:?} has no usable file name, exporting as {safe_name:?}");
        }
        let dir = self.root.join(&safe_name);
        if !self.create_block_dir(&dir)? {
            info!("block {definition:?}: {dir:?} exists, treating as exported");
            self.finish_block(definition, dir, BlockOutcome::Preexisting, true);
            return Ok(true);
        }

        self.in_progress.push(definition.to_string());
        let result = self.export_block_contents(scene, definition, &safe_name);
        self.in_progress.pop();
        let done = result?;

        if done {
            self.finish_block(definition, dir, BlockOutcome::Exported, true);
        } else {
            info!("block {definition:?} has nothing to export");
            if self.dry_run {
                self.planned_dirs.remove(&dir);
            } else {
                std::fs::remove_dir(&dir).map_err(|err| ExportError::io(&dir, err))?;
            }
            self.finish_block(definition, dir, BlockOutcome::Empty, false);
        }
        Ok(done)
    }

    fn export_block_contents<S: Scene>(&mut self, scene: &mut S, definition: &str, safe_name: &str) -> ExportResult<bool> {
        let mut parts = TransientScope::new(scene);
        let instance = parts.insert_block(definition, Vec3::ZERO)?;
        parts.track(instance);
        // One level only: nested instances stay instances and are exported
        // as blocks of their own.
        let ids = parts.explode(instance)?;
        parts.track_all(&ids);

        // The parts are deleted afterwards, so their names need no restoring.
        let mut names = NameMap::new();
        for &id in &ids {
            assign_unique_name(&mut *parts, id, &mut names)?;
        }

        parts.unselect_all();
        parts.select(&ids);
        let prefix = Path::new(safe_name).join(safe_name);
        let done = self.export_selection(&mut *parts, &prefix)?;
        parts.release()?;
        Ok(done)
    }

    /// `Ok(false)` when the directory already exists.
    fn create_block_dir(&mut self, dir: &Path) -> ExportResult<bool> {
        if self.dry_run {
            let on_disk = !self.fresh_root && dir.exists();
            return Ok(!on_disk && self.planned_dirs.insert(dir.to_path_buf()));
        }
        match std::fs::create_dir(dir) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(err) => Err(ExportError::io(dir, err)),
        }
    }

    fn finish_block(&mut self, definition: &str, directory: PathBuf, outcome: BlockOutcome, done: bool) {
        self.finished.insert(definition.to_string(), done);
        self.report.blocks.push(BlockReport {
            name: definition.to_string(),
            directory,
            outcome,
            instances: 1,
        });
    }

    fn export_file<S: Scene>(
        &mut self,
        scene: &mut S,
        ids: &[ObjectId],
        prefix: &Path,
        tag: &str,
        detail: Option<DetailLevel>,
    ) -> ExportResult<()> {
        let path = self.file_path(prefix, tag);
        scene.unselect_all();
        scene.select(ids);
        let objects = scene.selected();
        debug!("exporting {} objects to {path:?}", objects.len());

        if !self.dry_run {
            let options = ExportOptions::for_version(self.version, self.scale, detail);
            let view: &dyn Scene = &*scene;
            if !self.exporter.export(view, &objects, &path, &options) {
                scene.unselect_all();
                return Err(ExportError::HostExport { path });
            }
        }
        scene.unselect_all();
        self.report.files.push(path);
        Ok(())
    }

    /// `<root>/<prefix>.<tag>.3dm_<V>.fbx`
    fn file_path(&self, prefix: &Path, tag: &str) -> PathBuf {
        let mut file: OsString = prefix.as_os_str().to_owned();
        file.push(".");
        file.push(tag);
        file.push(export_suffix(self.version));
        self.root.join(file)
    }
}

fn of_class<S: Scene + ?Sized>(scene: &S, ids: &[ObjectId], class: ExportClass) -> Vec<ObjectId> {
    ids.iter()
        .copied()
        .filter(|&id| scene.kind(id).ok().and_then(classify) == Some(class))
        .collect()
}
