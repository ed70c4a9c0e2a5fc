use report_core::geom::Vec3;
use report_core::memory::MemoryScene;
use report_core::model::{DocumentInfo, Geometry, MeshData, ObjectRecord};
use report_core::options::{DetailLevel, ExportOptions};
use report_core::scene::Exporter;
use report_export::fbx::{write_fbx, FbxModel, FbxWriter};

fn quad() -> MeshData {
    MeshData::new(
        vec![
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::Y,
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

#[test]
fn polygon_ends_are_negated() {
    let models = [FbxModel {
        name: "floor".into(),
        mesh: quad(),
    }];
    let text = write_fbx(&models, &ExportOptions::for_version(6, 1.0, None)).unwrap();

    assert!(text.starts_with("; FBX 7.4.0 project file"));
    assert!(text.contains("\"Geometry::floor\", \"Mesh\""));
    assert!(text.contains("\"Model::floor\", \"Mesh\""));
    assert!(text.contains("a: 0,1,-3,0,2,-4"));
    assert!(text.contains("Vertices: *12"));
    assert!(text.contains("\"UnitScaleFactor\", \"double\", \"Number\", \"\",100"));
    assert!(text.contains("C: \"OO\",1000000,2000000"));
    assert!(!text.contains("; Detail:"));
}

#[test]
fn detail_exports_record_their_tessellation() {
    let options = ExportOptions::for_version(6, 0.001, Some(DetailLevel::Medium));
    let text = write_fbx(&[], &options).unwrap();
    assert!(text.contains("; Detail: 1 Angle=30"));
    assert!(text.contains("JaggedSeams=true"));
}

#[test]
fn names_are_quoted_safely() {
    let models = [FbxModel {
        name: "say \"hi\"".into(),
        mesh: quad(),
    }];
    let text = write_fbx(&models, &ExportOptions::for_version(5, 1.0, None)).unwrap();
    assert!(text.contains("Model::say &quot;hi&quot;"));
}

#[test]
fn writer_skips_objects_without_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = MemoryScene::new(DocumentInfo::default());
    let floor = scene.add(ObjectRecord::new(Some("floor"), Geometry::Mesh { mesh: quad() }));
    let edge = scene.add(ObjectRecord::new(
        Some("edge"),
        Geometry::Curve {
            points: vec![Vec3::ZERO, Vec3::X],
        },
    ));

    let path = dir.path().join("house.meshes.3dm_6.fbx");
    let mut writer = FbxWriter::new();
    assert!(writer.export(
        &scene,
        &[floor, edge],
        &path,
        &ExportOptions::for_version(6, 1.0, None)
    ));
    assert_eq!(vec![path.clone()], writer.written().to_vec());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("Model::floor"));
    assert!(!text.contains("edge"));
}

#[test]
fn writer_reports_unwritable_paths() {
    let dir = tempfile::tempdir().unwrap();
    let scene = MemoryScene::new(DocumentInfo::default());
    let path = dir.path().join("missing").join("x.fbx");
    let mut writer = FbxWriter::new();
    assert!(!writer.export(&scene, &[], &path, &ExportOptions::for_version(6, 1.0, None)));
    assert!(writer.written().is_empty());
}
