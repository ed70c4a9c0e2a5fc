//! Tetrahedron meshes standing in for block instances and lights.
//!
//! A placeholder's vertices are `[origin, origin + b0, origin + b1, origin + b2]`.
//! The importer reads the basis back from the vertex offsets, so lights reuse
//! the basis lengths to carry shape parameters.

use nalgebra::Vector3;
use report_core::error::SceneError;
use report_core::geom::Vec3;
use report_core::model::{LightData, MeshData, ObjectId, ObjectKind};
use report_core::naming::{block_token, sanitize_token, TOKEN_DELIMITER};
use report_core::scene::Scene;

/// Outward-consistent winding of the four tetrahedron faces.
pub const TETRAHEDRON_FACES: [[u32; 3]; 4] = [[0, 2, 1], [0, 3, 2], [0, 1, 3], [1, 2, 3]];

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub label: String,
    pub name: String,
    pub layer: String,
    pub mesh: MeshData,
}

impl Placeholder {
    pub fn object_name(&self) -> String {
        format!("{}{}{}", self.label, TOKEN_DELIMITER, self.name)
    }

    /// Adds the placeholder to the scene as a named mesh on its layer.
    pub fn insert<S: Scene + ?Sized>(&self, scene: &mut S) -> Result<ObjectId, SceneError> {
        let id = scene.add_mesh(self.mesh.clone())?;
        scene.set_name(id, Some(&self.object_name()))?;
        scene.set_layer(id, &self.layer)?;
        Ok(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
    Spot,
    Rectangular,
    Linear,
    Unknown,
}

impl LightKind {
    /// Probes the light's capabilities in a fixed order; the first match wins.
    pub fn probe(light: &LightData) -> LightKind {
        if light.is_point_light() {
            LightKind::Point
        } else if light.is_directional_light() {
            LightKind::Directional
        } else if light.is_spot_light() {
            LightKind::Spot
        } else if light.is_rectangular_light() {
            LightKind::Rectangular
        } else if light.is_linear_light() {
            LightKind::Linear
        } else {
            LightKind::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightKind::Point => "PointLight",
            LightKind::Directional => "DirectionalLight",
            LightKind::Spot => "SpotLight",
            LightKind::Rectangular => "RectangularLight",
            LightKind::Linear => "LinearLight",
            LightKind::Unknown => "UnknownLight",
        }
    }
}

fn na(v: Vec3) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

fn vec3(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Right-handed orthonormal basis whose third vector is `direction`
/// normalized. The first coordinate axis whose cosine with the direction lies
/// in `(-0.5, 0.5]` seeds the first vector; if none does (directions close to
/// a cube diagonal) the least aligned axis is used. A zero direction yields
/// the world basis.
pub fn complete_orthonormal_basis(direction: Vec3) -> [Vec3; 3] {
    let Some(d) = na(direction).try_normalize(f64::EPSILON) else {
        return [Vec3::X, Vec3::Y, Vec3::Z];
    };
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    let seed = axes
        .iter()
        .find(|axis| {
            let c = axis.dot(&d);
            c > -0.5 && c <= 0.5
        })
        .or_else(|| {
            axes.iter()
                .min_by(|a, b| a.dot(&d).abs().total_cmp(&b.dot(&d).abs()))
        })
        .copied()
        .unwrap_or_else(Vector3::x);

    let b0 = (seed - d * seed.dot(&d)).normalize();
    let b1 = d.cross(&b0);
    [vec3(&b0), vec3(&b1), vec3(&d)]
}

/// Basis offsets are divided by `scale`; the origin stays in document units
/// because the exporter rescales positions itself.
pub fn encode_transform(origin: Vec3, basis: [Vec3; 3], scale: f64) -> MeshData {
    let mut vertices = Vec::with_capacity(4);
    vertices.push(origin);
    for b in basis {
        vertices.push(origin + b / scale);
    }
    MeshData::new(vertices, TETRAHEDRON_FACES.to_vec())
}

fn object_token<S: Scene + ?Sized>(scene: &S, id: ObjectId) -> Result<String, SceneError> {
    Ok(sanitize_token(scene.name(id)?.as_deref().unwrap_or("")))
}

pub fn encode_block_instance<S: Scene + ?Sized>(
    scene: &S,
    instance: ObjectId,
    scale: f64,
) -> Result<Placeholder, SceneError> {
    let iref = scene.instance(instance)?;
    let xf = iref.xform;
    Ok(Placeholder {
        label: block_token(&iref.definition),
        name: object_token(scene, instance)?,
        layer: scene.layer(instance)?,
        mesh: encode_transform(xf.origin, [xf.x_axis, xf.y_axis, xf.z_axis], scale),
    })
}

/// Position and basis for a light, with shape parameters folded into the
/// basis lengths.
pub fn light_frame(light: &LightData) -> (LightKind, Vec3, [Vec3; 3]) {
    let kind = LightKind::probe(light);
    match kind {
        LightKind::Spot => {
            let [b0, b1, _] = complete_orthonormal_basis(light.direction);
            let outer = light.direction.length() * light.spot_angle.tan();
            let inner = light.hot_spot * outer;
            (kind, light.location, [b0 * outer, b1 * inner, light.direction])
        }
        LightKind::Rectangular => {
            let center = light.location + (light.length + light.width) * 0.5;
            let normal = na(light.length)
                .cross(&na(light.width))
                .try_normalize(f64::EPSILON)
                .map(|n| vec3(&n))
                .unwrap_or(Vec3::Z);
            // Height is flipped so the frame stays right handed after the
            // normal is negated.
            (kind, center, [light.length * 0.5, -light.width * 0.5, -normal])
        }
        LightKind::Linear => {
            let half = light.length * 0.5;
            let [b0, b1, _] = complete_orthonormal_basis(light.length);
            (kind, light.location + half, [b0, b1, half])
        }
        LightKind::Point | LightKind::Directional | LightKind::Unknown => {
            (kind, light.location, complete_orthonormal_basis(light.direction))
        }
    }
}

/// `None` when `object` is not a light.
pub fn encode_light<S: Scene + ?Sized>(
    scene: &S,
    object: ObjectId,
    scale: f64,
) -> Result<Option<Placeholder>, SceneError> {
    if scene.kind(object)? != ObjectKind::Light {
        return Ok(None);
    }
    let light = scene.light(object)?;
    let (kind, position, basis) = light_frame(&light);
    Ok(Some(Placeholder {
        label: kind.label().to_string(),
        name: object_token(scene, object)?,
        layer: scene.layer(object)?,
        mesh: encode_transform(position, basis, scale),
    }))
}
