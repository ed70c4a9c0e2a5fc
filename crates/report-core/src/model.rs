use crate::geom::{Vec3, Xform};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of host object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Point,
    PointCloud,
    Curve,
    Surface,
    Polysurface,
    Mesh,
    Light,
    Annotation,
    InstanceReference,
    TextDot,
    Hatch,
    ClippingPlane,
    SubD,
    Extrusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParametricKind {
    Surface,
    Polysurface,
    SubD,
    Extrusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightStyle {
    Point,
    Directional,
    Spot,
    Rectangular,
    Linear,
    Ambient,
}

/// Light parameters as the host records them.
///
/// `length` and `width` span the rectangle of a rectangular light (from the
/// `location` corner); `length` alone is the segment of a linear light.
/// `spot_angle` is the outer half-angle in radians and `hot_spot` the
/// inner/outer ratio in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightData {
    pub style: LightStyle,
    pub location: Vec3,
    #[serde(default)]
    pub direction: Vec3,
    #[serde(default)]
    pub length: Vec3,
    #[serde(default)]
    pub width: Vec3,
    #[serde(default)]
    pub spot_angle: f64,
    #[serde(default)]
    pub hot_spot: f64,
}

impl LightData {
    pub fn is_point_light(&self) -> bool {
        self.style == LightStyle::Point
    }

    pub fn is_directional_light(&self) -> bool {
        self.style == LightStyle::Directional
    }

    pub fn is_spot_light(&self) -> bool {
        self.style == LightStyle::Spot
    }

    pub fn is_rectangular_light(&self) -> bool {
        self.style == LightStyle::Rectangular
    }

    pub fn is_linear_light(&self) -> bool {
        self.style == LightStyle::Linear
    }

    pub fn transformed(&self, xf: &Xform) -> LightData {
        LightData {
            location: xf.apply_point(self.location),
            direction: xf.apply_vector(self.direction),
            length: xf.apply_vector(self.length),
            width: xf.apply_vector(self.width),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// First face referencing a vertex that does not exist.
    pub fn invalid_face(&self) -> Option<usize> {
        let n = self.vertices.len() as u64;
        self.faces
            .iter()
            .position(|f| f.iter().any(|&i| u64::from(i) >= n))
    }

    pub fn transformed(&self, xf: &Xform) -> MeshData {
        MeshData {
            vertices: self.vertices.iter().map(|&v| xf.apply_point(v)).collect(),
            faces: self.faces.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point {
        at: Vec3,
    },
    PointCloud {
        points: Vec<Vec3>,
    },
    Curve {
        points: Vec<Vec3>,
    },
    Mesh {
        mesh: MeshData,
    },
    /// Surfaces, polysurfaces, SubDs and extrusions. `render_mesh` stands in
    /// for the host's tessellation.
    Parametric {
        kind: ParametricKind,
        render_mesh: MeshData,
    },
    Light {
        light: LightData,
    },
    Instance {
        definition: String,
        #[serde(default)]
        xform: Xform,
    },
    Annotation {
        text: String,
    },
    TextDot {
        at: Vec3,
        text: String,
    },
    Hatch {
        boundary: Vec<Vec3>,
    },
    ClippingPlane {
        origin: Vec3,
        normal: Vec3,
    },
}

impl Geometry {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Geometry::Point { .. } => ObjectKind::Point,
            Geometry::PointCloud { .. } => ObjectKind::PointCloud,
            Geometry::Curve { .. } => ObjectKind::Curve,
            Geometry::Mesh { .. } => ObjectKind::Mesh,
            Geometry::Parametric { kind, .. } => match kind {
                ParametricKind::Surface => ObjectKind::Surface,
                ParametricKind::Polysurface => ObjectKind::Polysurface,
                ParametricKind::SubD => ObjectKind::SubD,
                ParametricKind::Extrusion => ObjectKind::Extrusion,
            },
            Geometry::Light { .. } => ObjectKind::Light,
            Geometry::Instance { .. } => ObjectKind::InstanceReference,
            Geometry::Annotation { .. } => ObjectKind::Annotation,
            Geometry::TextDot { .. } => ObjectKind::TextDot,
            Geometry::Hatch { .. } => ObjectKind::Hatch,
            Geometry::ClippingPlane { .. } => ObjectKind::ClippingPlane,
        }
    }

    /// Triangles the exporter writes for this object, if it has any.
    pub fn render_mesh(&self) -> Option<&MeshData> {
        match self {
            Geometry::Mesh { mesh } => Some(mesh),
            Geometry::Parametric { render_mesh, .. } => Some(render_mesh),
            _ => None,
        }
    }

    /// Copy of this geometry under `xf`. Nested instances compose their
    /// transform instead of being expanded.
    pub fn transformed(&self, xf: &Xform) -> Geometry {
        let points = |pts: &[Vec3]| pts.iter().map(|&p| xf.apply_point(p)).collect::<Vec<_>>();
        match self {
            Geometry::Point { at } => Geometry::Point {
                at: xf.apply_point(*at),
            },
            Geometry::PointCloud { points: p } => Geometry::PointCloud { points: points(p) },
            Geometry::Curve { points: p } => Geometry::Curve { points: points(p) },
            Geometry::Mesh { mesh } => Geometry::Mesh {
                mesh: mesh.transformed(xf),
            },
            Geometry::Parametric { kind, render_mesh } => Geometry::Parametric {
                kind: *kind,
                render_mesh: render_mesh.transformed(xf),
            },
            Geometry::Light { light } => Geometry::Light {
                light: light.transformed(xf),
            },
            Geometry::Instance { definition, xform } => Geometry::Instance {
                definition: definition.clone(),
                xform: xf.compose(xform),
            },
            Geometry::Annotation { text } => Geometry::Annotation { text: text.clone() },
            Geometry::TextDot { at, text } => Geometry::TextDot {
                at: xf.apply_point(*at),
                text: text.clone(),
            },
            Geometry::Hatch { boundary } => Geometry::Hatch {
                boundary: points(boundary),
            },
            Geometry::ClippingPlane { origin, normal } => Geometry::ClippingPlane {
                origin: xf.apply_point(*origin),
                normal: xf.apply_vector(*normal),
            },
        }
    }
}

/// Reference from an instance object to its block definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRef {
    pub definition: String,
    pub xform: Xform,
}

fn default_layer() -> String {
    "Default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_layer")]
    pub layer: String,
    #[serde(default)]
    pub selected: bool,
    pub geometry: Geometry,
}

impl ObjectRecord {
    pub fn new(name: Option<&str>, geometry: Geometry) -> Self {
        Self {
            name: name.map(str::to_string),
            layer: default_layer(),
            selected: false,
            geometry,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.geometry.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

fn default_host_version() -> u32 {
    6
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Host unit-system code, see [`crate::units::UnitSystem`].
    #[serde(default)]
    pub unit_system: i32,
    #[serde(default = "default_host_version")]
    pub host_version: u32,
    /// Full path of the saved document file, `None` if never saved.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Document file name including its extension.
    #[serde(default)]
    pub name: Option<String>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            unit_system: 0,
            host_version: default_host_version(),
            path: None,
            name: None,
        }
    }
}
