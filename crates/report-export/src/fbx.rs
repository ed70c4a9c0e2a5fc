use chrono::{Datelike, Timelike};
use itertools::Itertools;
use report_core::model::{MeshData, ObjectId};
use report_core::options::ExportOptions;
use report_core::scene::{Exporter, Scene};
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, warn};

const GEOMETRY_ID_BASE: u64 = 1_000_000;
const MODEL_ID_BASE: u64 = 2_000_000;

/// Writes ASCII FBX 7.4 files: one mesh model per exported object that has
/// surface geometry. Objects without triangles are skipped.
#[derive(Debug, Default)]
pub struct FbxWriter {
    written: Vec<std::path::PathBuf>,
}

impl FbxWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) -> &[std::path::PathBuf] {
        &self.written
    }
}

impl Exporter for FbxWriter {
    fn export(
        &mut self,
        scene: &dyn Scene,
        objects: &[ObjectId],
        path: &Path,
        options: &ExportOptions,
    ) -> bool {
        let models = match collect_models(scene, objects) {
            Ok(models) => models,
            Err(err) => {
                warn!("cannot export {path:?}: {err}");
                return false;
            }
        };
        let content = match write_fbx(&models, options) {
            Ok(content) => content,
            Err(err) => {
                warn!("cannot format {path:?}: {err}");
                return false;
            }
        };
        if let Err(err) = std::fs::write(path, content) {
            warn!("cannot write {path:?}: {err}");
            return false;
        }
        debug!("wrote {} models to {path:?}", models.len());
        self.written.push(path.to_path_buf());
        true
    }
}

pub struct FbxModel {
    pub name: String,
    pub mesh: MeshData,
}

fn collect_models(
    scene: &dyn Scene,
    objects: &[ObjectId],
) -> Result<Vec<FbxModel>, report_core::error::SceneError> {
    let mut models = Vec::new();
    for &id in objects {
        let Some(mesh) = scene.render_mesh(id)? else {
            debug!("object {id} has no mesh, skipped");
            continue;
        };
        models.push(FbxModel {
            name: scene.name(id)?.unwrap_or_default(),
            mesh,
        });
    }
    Ok(models)
}

fn escape(name: &str) -> String {
    name.replace('"', "&quot;")
}

pub fn write_fbx(models: &[FbxModel], options: &ExportOptions) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let now = chrono::Local::now();

    writeln!(out, "; FBX 7.4.0 project file")?;
    writeln!(out, "; Created by report {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "; Host version: {}", options.save.version)?;
    if let Some(level) = options.detail {
        let t = &options.tessellation;
        writeln!(
            out,
            "; Detail: {} Angle={} Distance={} MinEdgeLength={} MaxEdgeLength={} JaggedSeams={}",
            level.index(),
            t.angle_deg,
            t.distance,
            t.min_edge_length,
            t.max_edge_length,
            t.jagged_seams,
        )?;
    }
    writeln!(out)?;

    writeln!(out, "FBXHeaderExtension:  {{")?;
    writeln!(out, "\tFBXHeaderVersion: 1003")?;
    writeln!(out, "\tFBXVersion: 7400")?;
    writeln!(out, "\tCreationTimeStamp:  {{")?;
    writeln!(out, "\t\tVersion: 1000")?;
    writeln!(out, "\t\tYear: {}", now.year())?;
    writeln!(out, "\t\tMonth: {}", now.month())?;
    writeln!(out, "\t\tDay: {}", now.day())?;
    writeln!(out, "\t\tHour: {}", now.hour())?;
    writeln!(out, "\t\tMinute: {}", now.minute())?;
    writeln!(out, "\t\tSecond: {}", now.second())?;
    writeln!(out, "\t\tMillisecond: 0")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\tCreator: \"report {}\"", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "}}")?;

    // FBX lengths are centimeters; the importer divides positions by this.
    let up_axis = if options.fbx.y_up == Some(true) { 1 } else { 2 };
    writeln!(out, "GlobalSettings:  {{")?;
    writeln!(out, "\tVersion: 1000")?;
    writeln!(out, "\tProperties70:  {{")?;
    writeln!(out, "\t\tP: \"UpAxis\", \"int\", \"Integer\", \"\",{up_axis}")?;
    writeln!(out, "\t\tP: \"UpAxisSign\", \"int\", \"Integer\", \"\",1")?;
    writeln!(out, "\t\tP: \"CoordAxis\", \"int\", \"Integer\", \"\",0")?;
    writeln!(out, "\t\tP: \"CoordAxisSign\", \"int\", \"Integer\", \"\",1")?;
    writeln!(
        out,
        "\t\tP: \"UnitScaleFactor\", \"double\", \"Number\", \"\",{}",
        options.unit_scale * 100.0
    )?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;

    writeln!(out, "Definitions:  {{")?;
    writeln!(out, "\tVersion: 100")?;
    writeln!(out, "\tCount: {}", models.len() * 2)?;
    writeln!(out, "\tObjectType: \"Model\" {{")?;
    writeln!(out, "\t\tCount: {}", models.len())?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\tObjectType: \"Geometry\" {{")?;
    writeln!(out, "\t\tCount: {}", models.len())?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;

    writeln!(out, "Objects:  {{")?;
    for (i, model) in models.iter().enumerate() {
        let geometry_id = GEOMETRY_ID_BASE + i as u64;
        let model_id = MODEL_ID_BASE + i as u64;
        let name = escape(&model.name);
        let vertices = model
            .mesh
            .vertices
            .iter()
            .flat_map(|v| v.to_array())
            .join(",");
        // The last index of each polygon is stored as -(index + 1).
        let indices = model
            .mesh
            .faces
            .iter()
            .flat_map(|f| [i64::from(f[0]), i64::from(f[1]), -i64::from(f[2]) - 1])
            .join(",");

        writeln!(out, "\tGeometry: {geometry_id}, \"Geometry::{name}\", \"Mesh\" {{")?;
        writeln!(out, "\t\tVertices: *{} {{", model.mesh.vertices.len() * 3)?;
        writeln!(out, "\t\t\ta: {vertices}")?;
        writeln!(out, "\t\t}}")?;
        writeln!(out, "\t\tPolygonVertexIndex: *{} {{", model.mesh.faces.len() * 3)?;
        writeln!(out, "\t\t\ta: {indices}")?;
        writeln!(out, "\t\t}}")?;
        writeln!(out, "\t\tGeometryVersion: 124")?;
        writeln!(out, "\t}}")?;

        writeln!(out, "\tModel: {model_id}, \"Model::{name}\", \"Mesh\" {{")?;
        writeln!(out, "\t\tVersion: 232")?;
        writeln!(out, "\t\tShading: Y")?;
        writeln!(out, "\t\tCulling: \"CullingOff\"")?;
        writeln!(out, "\t}}")?;
    }
    writeln!(out, "}}")?;

    writeln!(out, "Connections:  {{")?;
    for i in 0..models.len() as u64 {
        writeln!(out, "\tC: \"OO\",{},{}", GEOMETRY_ID_BASE + i, MODEL_ID_BASE + i)?;
        writeln!(out, "\tC: \"OO\",{},0", MODEL_ID_BASE + i)?;
    }
    writeln!(out, "}}")?;
    Ok(out)
}
