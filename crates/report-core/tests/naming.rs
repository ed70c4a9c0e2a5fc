use report_core::geom::Vec3;
use report_core::memory::MemoryScene;
use report_core::model::{
    DocumentInfo, Geometry, LightData, LightStyle, MeshData, ObjectId, ObjectRecord,
};
use report_core::naming::{
    assign_unique_name, block_token, revert_names, sanitize_file_name, sanitize_token, NameMap,
    FORBIDDEN_FILE_CHARS,
};
use report_core::scene::Scene;

fn mesh() -> Geometry {
    Geometry::Mesh {
        mesh: MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        ),
    }
}

fn light() -> Geometry {
    Geometry::Light {
        light: LightData {
            style: LightStyle::Point,
            location: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
            length: Vec3::ZERO,
            width: Vec3::ZERO,
            spot_angle: 0.0,
            hot_spot: 0.0,
        },
    }
}

fn scene_with(names: &[Option<&str>]) -> (MemoryScene, Vec<ObjectId>) {
    let mut scene = MemoryScene::new(DocumentInfo::default());
    let ids = names
        .iter()
        .map(|name| scene.add(ObjectRecord::new(*name, mesh())))
        .collect();
    (scene, ids)
}

#[test]
fn sanitizing_removes_forbidden_characters_and_is_idempotent() {
    for s in [
        "plain",
        "a<b>c:d\"e/f\\g|h?i*j",
        "***",
        "",
        "wall=door",
        "ünïcødé <name>",
    ] {
        let once = sanitize_file_name(s);
        assert_eq!(once, sanitize_file_name(&once));
        assert!(!once.chars().any(|c| FORBIDDEN_FILE_CHARS.contains(&c)));
    }
    assert_eq!("abcdefghij", sanitize_file_name("a<b>c:d\"e/f\\g|h?i*j"));
}

#[test]
fn tokens_replace_the_placeholder_delimiter() {
    assert_eq!("wall-door", sanitize_token("wall=door"));
    assert_eq!("ab-c", sanitize_token("a/b=c"));
}

#[test]
fn block_names_without_safe_characters_fall_back() {
    assert_eq!("chair-v2", block_token("chair=v2"));
    assert_eq!("A", block_token("A:"));
    assert_eq!("Block", block_token("???"));
    assert_eq!("Block", block_token(""));
}

#[test]
fn duplicate_and_empty_names_become_distinct() {
    let (mut scene, ids) = scene_with(&[Some(""), Some(""), Some("A"), Some("A")]);
    let mut map = NameMap::new();
    let assigned: Vec<String> = ids
        .iter()
        .map(|&id| assign_unique_name(&mut scene, id, &mut map).unwrap())
        .collect();

    assert_eq!(vec!["Object_0", "Object_1", "A", "A_0"], assigned);
    for (id, name) in ids.iter().zip(&assigned) {
        assert_eq!(Some(name.clone()), scene.name(*id).unwrap());
    }
    assert_eq!(4, map.len());
}

#[test]
fn unnamed_lights_get_a_light_default() {
    let mut scene = MemoryScene::new(DocumentInfo::default());
    let id = scene.add(ObjectRecord::new(None, light()));
    let mut map = NameMap::new();
    assert_eq!("Light_0", assign_unique_name(&mut scene, id, &mut map).unwrap());
    assert_eq!(None, map.get("Light_0").unwrap().original);
}

#[test]
fn names_that_sanitize_to_nothing_use_the_default() {
    let (mut scene, ids) = scene_with(&[Some("???"), Some("a=b")]);
    let mut map = NameMap::new();
    assert_eq!("Object", assign_unique_name(&mut scene, ids[0], &mut map).unwrap());
    assert_eq!("a-b", assign_unique_name(&mut scene, ids[1], &mut map).unwrap());
}

#[test]
fn reverting_restores_exact_original_names() {
    let originals = [None, Some(""), Some("A"), Some("A"), Some("x:y")];
    let (mut scene, ids) = scene_with(&originals);
    let mut map = NameMap::new();
    for &id in &ids {
        assign_unique_name(&mut scene, id, &mut map).unwrap();
    }

    revert_names(&mut scene, &mut map).unwrap();
    assert!(map.is_empty());
    for (id, original) in ids.iter().zip(originals) {
        assert_eq!(original.map(str::to_string), scene.name(*id).unwrap());
    }

    // Second revert has nothing left to do.
    revert_names(&mut scene, &mut map).unwrap();
    assert_eq!(None, scene.name(ids[0]).unwrap());
}

#[test]
fn reverting_skips_deleted_and_renamed_objects() {
    let (mut scene, ids) = scene_with(&[Some("A"), Some("B")]);
    let mut map = NameMap::new();
    for &id in &ids {
        assign_unique_name(&mut scene, id, &mut map).unwrap();
    }
    scene.delete(&ids[..1]).unwrap();
    scene.set_name(ids[1], Some("renamed")).unwrap();

    revert_names(&mut scene, &mut map).unwrap();
    assert_eq!(Some("renamed".to_string()), scene.name(ids[1]).unwrap());
}
