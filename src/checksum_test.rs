use super::*;
use crate::scene::{Geometry, Shape, Style};

fn rect(id: &str, layer_id: &str, width: f64) -> Shape {
    Shape {
        id: id.into(),
        layer_id: layer_id.into(),
        x: Some(10.0),
        y: Some(20.0),
        rotation: None,
        style: Style { stroke: Some("#111827".into()), ..Style::default() },
        geometry: Geometry::Rect { width, height: 50.0, corner_radius: None },
    }
}

fn line(id: &str, layer_id: &str) -> Shape {
    Shape {
        id: id.into(),
        layer_id: layer_id.into(),
        x: None,
        y: None,
        rotation: None,
        style: Style::default(),
        geometry: Geometry::Line { points: vec![0.0, 0.0, 5.0, 5.0], tension: None, closed: None },
    }
}

#[test]
fn same_input_same_digest() {
    let shapes = vec![rect("a", "l1", 100.0), line("b", "l1")];
    let first = compute_checksum(&shapes);
    let second = compute_checksum(&shapes);
    assert_eq!(first, second);
}

#[test]
fn digest_ignores_shape_order() {
    let a = rect("a", "l1", 100.0);
    let b = line("b", "l1");
    let c = rect("c", "l2", 30.0);

    let forward = compute_checksum([&a, &b, &c]);
    let shuffled = compute_checksum([&c, &a, &b]);
    assert_eq!(forward, shuffled);
}

#[test]
fn digest_ignores_client_ids() {
    // Two clients invent different local ids for identical geometry.
    let ours = vec![rect("local-1", "l1", 100.0), line("local-2", "l1")];
    let theirs = vec![rect("other-9", "l1", 100.0), line("other-8", "l1")];
    assert_eq!(compute_checksum(&ours), compute_checksum(&theirs));
}

#[test]
fn digest_reflects_content_changes() {
    let base = vec![rect("a", "l1", 100.0)];
    let resized = vec![rect("a", "l1", 101.0)];
    assert_ne!(compute_checksum(&base), compute_checksum(&resized));
}

#[test]
fn digest_reflects_layer_membership() {
    // Same geometry on a different layer is different persisted state.
    let on_l1 = vec![rect("a", "l1", 100.0)];
    let on_l2 = vec![rect("a", "l2", 100.0)];
    assert_ne!(compute_checksum(&on_l1), compute_checksum(&on_l2));
}

#[test]
fn digest_reflects_style_changes() {
    let mut styled = rect("a", "l1", 100.0);
    styled.style.opacity = Some(0.5);
    assert_ne!(compute_checksum([&rect("a", "l1", 100.0)]), compute_checksum([&styled]));
}

#[test]
fn empty_set_digest_is_stable() {
    let empty: Vec<Shape> = Vec::new();
    assert_eq!(compute_checksum(&empty), compute_checksum(&empty));
    assert_eq!(compute_checksum(&empty).as_str().len(), 64);
}

#[test]
fn digest_is_lowercase_hex() {
    let digest = compute_checksum([&rect("a", "l1", 100.0)]);
    assert_eq!(digest.as_str().len(), 64);
    assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn digest_display_matches_as_str() {
    let digest = Digest::new("abc123");
    assert_eq!(digest.to_string(), "abc123");
    assert_eq!(digest.as_str(), "abc123");
}
