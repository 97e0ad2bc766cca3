use serde_json::json;

use super::*;
use crate::scene::Geometry;

// =============================================================
// Status classification
// =============================================================

#[test]
fn status_404_is_not_found() {
    assert!(matches!(classify_status(404, String::new()), StoreError::NotFound));
}

#[test]
fn validation_statuses_are_rejected() {
    for status in [400, 422] {
        match classify_status(status, "bad payload".into()) {
            StoreError::Rejected { status: s, body } => {
                assert_eq!(s, status);
                assert_eq!(body, "bad payload");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}

#[test]
fn server_errors_are_unavailable() {
    for status in [500, 502, 503] {
        assert!(matches!(classify_status(status, String::new()), StoreError::Unavailable(_)));
    }
}

// =============================================================
// Wire parsing
// =============================================================

#[test]
fn checksum_response_parses() {
    let digest = parse_checksum_response(r#"{"checksum":"abc123"}"#).unwrap();
    assert_eq!(digest.as_str(), "abc123");
}

#[test]
fn checksum_response_garbage_is_malformed() {
    assert!(matches!(parse_checksum_response("not json"), Err(StoreError::Malformed(_))));
    assert!(matches!(parse_checksum_response(r#"{"sum":"x"}"#), Err(StoreError::Malformed(_))));
}

#[test]
fn canvas_document_defaults_missing_fields() {
    let doc: CanvasDocument = serde_json::from_str("{}").unwrap();
    assert!(doc.is_empty());

    let doc: CanvasDocument = serde_json::from_value(json!({
        "layers": [{"id": "l1", "name": "Layer 1", "visible": true, "locked": false}],
        "shapes": []
    }))
    .unwrap();
    assert!(!doc.is_empty());
    assert_eq!(doc.layers[0].id, "l1");
}

#[test]
fn save_request_uses_camel_case_ids() {
    let layers = vec![Layer::new("Layer 1")];
    let shapes = vec![Shape::new(&layers[0].id, Geometry::Path { data: "M0 0".into() })];
    let request = SaveRequest { canvas_id: "b1", user_id: "u1", layers: &layers, shapes: &shapes };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["canvasId"], "b1");
    assert_eq!(value["userId"], "u1");
    assert_eq!(value["layers"].as_array().unwrap().len(), 1);
    assert_eq!(value["shapes"][0]["type"], "path");
}

// =============================================================
// Endpoints
// =============================================================

#[test]
fn endpoint_urls() {
    let store = HttpCanvasStore::new("http://canvas.local").unwrap();
    assert_eq!(store.canvas_url("b1"), "http://canvas.local/canvas?id=b1");
    assert_eq!(store.checksum_url("b1"), "http://canvas.local/canvas/checksum?id=b1");
    assert_eq!(store.svg_url("b1"), "http://canvas.local/canvas/svg?id=b1");
    assert_eq!(store.save_url(), "http://canvas.local/canvas/save");
}
