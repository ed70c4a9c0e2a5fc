//! Capabilities the exporter needs from a host scene graph.

use crate::error::SceneError;
use crate::geom::Vec3;
use crate::model::{DocumentInfo, InstanceRef, LightData, MeshData, ObjectId, ObjectKind};
use crate::options::ExportOptions;
use std::path::Path;

/// A mutable host scene. Callers hold exclusive access for a whole run.
pub trait Scene {
    fn document(&self) -> DocumentInfo;

    /// All live objects in a stable order.
    fn objects(&self) -> Vec<ObjectId>;
    fn contains(&self, id: ObjectId) -> bool;
    fn kind(&self, id: ObjectId) -> Result<ObjectKind, SceneError>;

    fn name(&self, id: ObjectId) -> Result<Option<String>, SceneError>;
    fn set_name(&mut self, id: ObjectId, name: Option<&str>) -> Result<(), SceneError>;
    fn layer(&self, id: ObjectId) -> Result<String, SceneError>;
    fn set_layer(&mut self, id: ObjectId, layer: &str) -> Result<(), SceneError>;

    fn selected(&self) -> Vec<ObjectId>;
    /// Adds to the current selection. Unknown ids are ignored.
    fn select(&mut self, ids: &[ObjectId]);
    fn unselect_all(&mut self);

    fn instance(&self, id: ObjectId) -> Result<InstanceRef, SceneError>;
    fn light(&self, id: ObjectId) -> Result<LightData, SceneError>;
    /// Triangles the host would export for `id`, `None` for objects without
    /// surface geometry.
    fn render_mesh(&self, id: ObjectId) -> Result<Option<MeshData>, SceneError>;

    /// Places a new instance of `definition` translated to `origin`.
    fn insert_block(&mut self, definition: &str, origin: Vec3) -> Result<ObjectId, SceneError>;
    /// Replaces an instance by copies of its definition's objects. Nested
    /// instances stay instances.
    fn explode(&mut self, id: ObjectId) -> Result<Vec<ObjectId>, SceneError>;
    fn delete(&mut self, ids: &[ObjectId]) -> Result<(), SceneError>;
    fn add_mesh(&mut self, mesh: MeshData) -> Result<ObjectId, SceneError>;
}

/// Writes a set of scene objects to one file.
pub trait Exporter {
    /// Returns `false` when the host reports the export failed.
    fn export(
        &mut self,
        scene: &dyn Scene,
        objects: &[ObjectId],
        path: &Path,
        options: &ExportOptions,
    ) -> bool;
}
