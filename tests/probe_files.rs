//! Integration tests for loading trace roots laid out on disk.

use std::fs;
use std::path::Path;

use rayprobe::prelude::*;
use rayprobe::raydump::encode_ray_dump;

use tempfile::TempDir;

/// Create `<root>/scientist/` and return the temp root.
fn trace_root() -> TempDir {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(root.path().join(DEFAULT_SCENE_DIR)).expect("Failed to create scene dir");
    root
}

fn write_dump(root: &Path, set: &RaySet, layout: DumpLayout) {
    let mut writer = RayDumpWriter::create(TraceLayout::default().ray_dump_path(root))
        .expect("Failed to create dump");
    writer.write(set, layout).expect("Failed to write dump");
}

fn write_obj(root: &Path, text: &str) {
    fs::write(TraceLayout::default().mesh_path(root), text).expect("Failed to write OBJ");
}

fn shadows(connected: &[bool]) -> RaySet {
    RaySet::from_shadows(
        connected
            .iter()
            .enumerate()
            .map(|(i, &c)| ShadowQuery::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::new(0.0, 5.0, 0.0), c))
            .collect(),
    )
}

#[test]
fn test_seven_of_ten_connected() {
    let root = trace_root();
    let flags = [true, true, false, true, true, false, true, false, true, true];
    write_dump(root.path(), &shadows(&flags), DumpLayout::Versioned { with_t: true });

    let count = analyze_shadow_connectivity(root.path()).expect("Failed to analyze");
    assert_eq!(count, 7);

    // Same file, same answer.
    assert_eq!(analyze_shadow_connectivity(root.path()).unwrap(), 7);
}

#[test]
fn test_all_or_none_connected() {
    let root = trace_root();

    write_dump(root.path(), &shadows(&[true; 6]), DumpLayout::Versioned { with_t: true });
    assert_eq!(analyze_shadow_connectivity(root.path()).unwrap(), 6);

    write_dump(root.path(), &shadows(&[false; 6]), DumpLayout::Versioned { with_t: true });
    assert_eq!(analyze_shadow_connectivity(root.path()).unwrap(), 0);
}

#[test]
fn test_no_shadow_queries() {
    let root = trace_root();
    write_dump(root.path(), &RaySet::new(), DumpLayout::Versioned { with_t: true });

    let stats = TraceLayout::default().shadow_stats(root.path()).unwrap();
    assert_eq!(stats, ShadowStats { total: 0, connected: 0 });
}

#[test]
fn test_legacy_dump_on_disk() {
    let root = trace_root();
    let mut set = shadows(&[true, false, true]);
    set.push_cast_miss(CastMissQuery { depth: 0, origin: Vec3::ZERO, direction: Vec3::X });
    write_dump(root.path(), &set, DumpLayout::Legacy);

    let loaded = load_ray_set(root.path()).unwrap();
    assert_eq!(loaded, set);
    assert_eq!(analyze_shadow_connectivity(root.path()).unwrap(), 2);
}

#[test]
fn test_missing_dump_is_not_found() {
    let root = trace_root();
    let err = analyze_shadow_connectivity(root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    match err {
        Error::FileNotFound { path, .. } => assert!(path.ends_with("scientist/raydump.ray")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_corrupt_dump_is_format_error() {
    let root = trace_root();
    let path = TraceLayout::default().ray_dump_path(root.path());

    let mut bytes = encode_ray_dump(&shadows(&[true, true]), DumpLayout::Versioned { with_t: true }).unwrap();
    bytes.truncate(bytes.len() - 5);
    fs::write(&path, &bytes).unwrap();
    assert_eq!(analyze_shadow_connectivity(root.path()).unwrap_err().kind(), ErrorKind::Format);

    // Wrong version in an otherwise valid header.
    let mut bytes = encode_ray_dump(&shadows(&[true]), DumpLayout::Versioned { with_t: true }).unwrap();
    bytes[4..8].copy_from_slice(&9i32.to_le_bytes());
    fs::write(&path, &bytes).unwrap();
    assert!(matches!(
        analyze_shadow_connectivity(root.path()).unwrap_err(),
        Error::UnsupportedVersion(9)
    ));
}

#[test]
fn test_cut_legacy_dump_is_format_error() {
    let root = trace_root();
    let path = TraceLayout::default().ray_dump_path(root.path());

    // Drop the last record and the end marker: every remaining record is whole.
    let mut bytes = encode_ray_dump(&shadows(&[true, true, true]), DumpLayout::Legacy).unwrap();
    bytes.truncate(bytes.len() - DumpLayout::Legacy.record_size() as usize - 4);
    fs::write(&path, &bytes).unwrap();
    let err = analyze_shadow_connectivity(root.path()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(matches!(err, Error::UnexpectedEof(64)));

    fs::write(&path, vec![0u8; 320]).unwrap();
    assert_eq!(load_ray_set(root.path()).unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn test_three_triangle_mesh() {
    let root = trace_root();
    write_obj(
        root.path(),
        "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nv 0.0 0.0 1.0\nv 2.5 -1.0 3.0\n\
         f 1 2 3\nf 2 4 5\nf 5 1 3\n",
    );

    let tris = load_triangle_mesh(root.path()).expect("Failed to load mesh");
    assert_eq!(tris.len(), 3);

    let v5 = Vec3::new(2.5, -1.0, 3.0);
    assert_eq!(tris[0], Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y));
    assert_eq!(tris[1], Triangle::new(Vec3::X, Vec3::Z, v5));
    assert_eq!(tris[2], Triangle::new(v5, Vec3::ZERO, Vec3::Y));
}

#[test]
fn test_mesh_stats_from_disk() {
    let root = trace_root();
    write_obj(root.path(), "v -1 0 0\nv 1 0 0\nv 0 2 0\nv 0 0 4\nf 1 2 3\n");

    let stats = TraceLayout::default().load_mesh(root.path()).unwrap().stats();
    assert_eq!(stats.triangles, 1);
    assert_eq!(stats.vertices, 4);
    assert_eq!(stats.bounds.min, Vec3::new(-1.0, 0.0, 0.0));
    assert_eq!(stats.bounds.max, Vec3::new(1.0, 2.0, 0.0));
}

#[test]
fn test_malformed_face_is_format_error() {
    let root = trace_root();
    write_obj(root.path(), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 x\n");

    let err = load_triangle_mesh(root.path()).unwrap_err();
    assert!(err.is_format());
    assert!(matches!(err, Error::Obj { line: 5, .. }));
}

#[test]
fn test_missing_mesh_is_not_found() {
    let root = trace_root();
    assert!(load_triangle_mesh(root.path()).unwrap_err().is_not_found());
}

#[test]
fn test_pipelines_are_independent() {
    let root = trace_root();
    write_obj(root.path(), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

    // Mesh loads even though the dump is missing, and vice versa.
    assert!(analyze_shadow_connectivity(root.path()).is_err());
    assert_eq!(load_triangle_mesh(root.path()).unwrap().len(), 1);
}

#[test]
fn test_custom_scene_layout() {
    let root = tempfile::tempdir().unwrap();
    let layout = TraceLayout::for_scene("sponza");
    fs::create_dir_all(root.path().join("sponza")).unwrap();
    fs::write(
        layout.ray_dump_path(root.path()),
        encode_ray_dump(&shadows(&[true, false]), DumpLayout::Versioned { with_t: true }).unwrap(),
    )
    .unwrap();

    assert_eq!(layout.analyze_shadow_connectivity(root.path()).unwrap(), 1);
    assert!(analyze_shadow_connectivity(root.path()).unwrap_err().is_not_found());
}

#[test]
fn test_recheck_shadows_against_mesh() {
    let root = trace_root();
    // A floor-sized triangle in the z = 0 plane.
    write_obj(root.path(), "v -10 -10 0\nv 10 -10 0\nv 0 10 0\nf 1 2 3\n");

    let blocked = ShadowQuery::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, 2.0), false);
    let clear = ShadowQuery::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 2.0), true);
    write_dump(root.path(), &RaySet::from_shadows(vec![blocked, clear]), DumpLayout::Legacy);

    let mesh = TraceLayout::default().load_mesh(root.path()).unwrap();
    let set = load_ray_set(root.path()).unwrap();
    for q in set.shadow_queries() {
        assert_eq!(mesh.first_hit(q.origin, q.difference).is_none(), q.connected);
    }
}
