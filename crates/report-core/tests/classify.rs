use report_core::classify::{classify, select_exportable, ExportClass};
use report_core::geom::Vec3;
use report_core::memory::MemoryScene;
use report_core::model::{
    BlockDefinition, DocumentInfo, Geometry, MeshData, ObjectKind, ObjectRecord, ParametricKind,
};
use std::collections::HashMap;

#[test]
fn each_exportable_kind_maps_to_one_class() {
    let expected = HashMap::from([
        (ObjectKind::Light, ExportClass::Lights),
        (ObjectKind::Mesh, ExportClass::Meshes),
        (ObjectKind::Surface, ExportClass::DetailSurfaces),
        (ObjectKind::Polysurface, ExportClass::DetailSurfaces),
        (ObjectKind::SubD, ExportClass::DetailSurfaces),
        (ObjectKind::Extrusion, ExportClass::DetailSurfaces),
        (ObjectKind::InstanceReference, ExportClass::BlockInstances),
    ]);
    for (kind, class) in &expected {
        assert_eq!(Some(*class), classify(*kind));
    }
    for kind in [
        ObjectKind::Point,
        ObjectKind::PointCloud,
        ObjectKind::Curve,
        ObjectKind::Annotation,
        ObjectKind::TextDot,
        ObjectKind::Hatch,
        ObjectKind::ClippingPlane,
    ] {
        assert_eq!(None, classify(kind));
    }
}

#[test]
fn selects_only_exportable_objects() {
    let mut scene = MemoryScene::new(DocumentInfo::default());
    scene.add_block(BlockDefinition {
        name: "B".into(),
        objects: Vec::new(),
    });
    let curve = scene.add(ObjectRecord::new(
        Some("c"),
        Geometry::Curve {
            points: vec![Vec3::ZERO, Vec3::X],
        },
    ));
    let surface = scene.add(ObjectRecord::new(
        Some("s"),
        Geometry::Parametric {
            kind: ParametricKind::Extrusion,
            render_mesh: MeshData::default(),
        },
    ));
    let instance = scene.add(ObjectRecord::new(
        None,
        Geometry::Instance {
            definition: "B".into(),
            xform: Default::default(),
        },
    ));

    let selected = select_exportable(&scene);
    assert_eq!(vec![surface, instance], selected);
    assert!(!selected.contains(&curve));
}
