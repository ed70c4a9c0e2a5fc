use serde::{Deserialize, Serialize};

/// Host major versions the export option set is defined for.
pub const SUPPORTED_VERSIONS: [u32; 2] = [5, 6];

/// Tessellation presets for parametric geometry. Level 0 is the finest and
/// doubles as the collision mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetailLevel {
    Fine,
    Medium,
    Coarse,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [DetailLevel::Fine, DetailLevel::Medium, DetailLevel::Coarse];

    pub fn index(self) -> u8 {
        match self {
            DetailLevel::Fine => 0,
            DetailLevel::Medium => 1,
            DetailLevel::Coarse => 2,
        }
    }

    // Fixed values, not derived from object scale.
    pub fn tessellation(self) -> TessellationParams {
        let (angle_deg, distance, min_edge_length, jagged_seams) = match self {
            DetailLevel::Fine => (15.0, 0.01, 0.001, false),
            DetailLevel::Medium => (30.0, 0.1, 0.01, true),
            DetailLevel::Coarse => (45.0, 1.0, 0.1, true),
        };
        TessellationParams {
            polygon_density: 0.0,
            jagged_seams,
            simple_plane: true,
            refine: true,
            pack_textures: false,
            angle_deg,
            aspect_ratio: 0.0,
            distance,
            density: 0.0,
            grid: 0,
            max_edge_length: 0.0,
            min_edge_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TessellationParams {
    pub polygon_density: f64,
    pub jagged_seams: bool,
    pub simple_plane: bool,
    pub refine: bool,
    pub pack_textures: bool,
    pub angle_deg: f64,
    pub aspect_ratio: f64,
    pub distance: f64,
    pub density: f64,
    pub grid: u32,
    pub max_edge_length: f64,
    pub min_edge_length: f64,
}

impl Default for TessellationParams {
    fn default() -> Self {
        DetailLevel::Fine.tessellation()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSettings {
    pub version: u32,
    pub save_textures: bool,
    pub geometry_only: bool,
    pub save_plugin_data: bool,
    pub save_small: bool,
    /// Only understood by version 6.
    pub save_notes: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FbxSettings {
    pub binary_v7: bool,
    pub nurbs_as_mesh: bool,
    pub lambert_materials: bool,
    /// Only understood by version 6.
    pub y_up: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub save: SaveSettings,
    pub fbx: FbxSettings,
    pub tessellation: TessellationParams,
    pub detail: Option<DetailLevel>,
    /// Meters per model unit of the exported document.
    pub unit_scale: f64,
}

impl ExportOptions {
    pub fn for_version(version: u32, unit_scale: f64, detail: Option<DetailLevel>) -> Self {
        let v6 = version >= 6;
        Self {
            save: SaveSettings {
                version,
                save_textures: true,
                geometry_only: false,
                save_plugin_data: false,
                save_small: true,
                save_notes: v6.then_some(false),
            },
            fbx: FbxSettings {
                binary_v7: true,
                nurbs_as_mesh: true,
                lambert_materials: true,
                y_up: v6.then_some(false),
            },
            tessellation: detail.unwrap_or(DetailLevel::Fine).tessellation(),
            detail,
            unit_scale,
        }
    }
}

/// Suffix the host and the importer key the file format and provenance on.
pub fn export_suffix(version: u32) -> String {
    format!(".3dm_{version}.fbx")
}
