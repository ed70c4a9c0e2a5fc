use crate::model::{ObjectId, ObjectKind};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};

/// Export pass an object belongs to. Every object kind maps to at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportClass {
    Lights,
    Meshes,
    DetailSurfaces,
    BlockInstances,
}

pub fn classify(kind: ObjectKind) -> Option<ExportClass> {
    match kind {
        ObjectKind::Light => Some(ExportClass::Lights),
        ObjectKind::Mesh => Some(ExportClass::Meshes),
        ObjectKind::Surface
        | ObjectKind::Polysurface
        | ObjectKind::SubD
        | ObjectKind::Extrusion => Some(ExportClass::DetailSurfaces),
        ObjectKind::InstanceReference => Some(ExportClass::BlockInstances),
        ObjectKind::Point
        | ObjectKind::PointCloud
        | ObjectKind::Curve
        | ObjectKind::Annotation
        | ObjectKind::TextDot
        | ObjectKind::Hatch
        | ObjectKind::ClippingPlane => None,
    }
}

pub fn is_exportable(kind: ObjectKind) -> bool {
    classify(kind).is_some()
}

/// Every object in the scene belonging to one of the export classes, in
/// scene order.
pub fn select_exportable<S: Scene + ?Sized>(scene: &S) -> Vec<ObjectId> {
    scene
        .objects()
        .into_iter()
        .filter(|&id| scene.kind(id).map(is_exportable).unwrap_or(false))
        .collect()
}
