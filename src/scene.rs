//! Scene model: layers, shapes, and comments for one open board.
//!
//! This module defines the client-side authoritative board state
//! (`SceneModel`), the drawable shape types (`Shape`, `Geometry`, `Style`),
//! layer metadata (`Layer`), and board comments (`Comment`).
//!
//! Data flows into this layer from user edits (incremental mutations) and
//! from the sync engine (wholesale snapshot replacement on bootstrap or
//! reconcile). The persistence path reads `persistable_shapes` to build the
//! save payload and the checksum input.
//!
//! INVARIANTS
//! ==========
//! - Every shape's `layer_id` references an existing layer; removing a layer
//!   cascades to its shapes.
//! - At least one layer exists at all times; the last layer cannot be removed.
//! - `replace_board` is atomic: layers and shapes swap together and comments
//!   are never touched by it.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix marking a comment id as provisional (local-only, unsaved).
pub const TEMP_ID_PREFIX: &str = "temp-";

// =============================================================================
// LAYER
// =============================================================================

/// A drawing layer. Position in `SceneModel::layers` is z-order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Client-generated layer id.
    pub id: String,
    /// Display name, e.g. "Layer 2".
    pub name: String,
    /// Hidden layers are excluded from the persisted shape set.
    pub visible: bool,
    /// Locked layers reject edits in the UI; persistence is unaffected.
    pub locked: bool,
}

impl Layer {
    /// Create a visible, unlocked layer with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), name: name.into(), visible: true, locked: false }
    }
}

// =============================================================================
// SHAPE
// =============================================================================

/// Stroke/fill attributes shared by all shape kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Stroke color as a CSS color string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Fill color as a CSS color string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke width in world units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Opacity in `0.0..=1.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Per-kind geometry, discriminated by a lowercase `type` tag on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Geometry {
    /// Straight polyline between the given points.
    Line {
        /// Flat `[x0, y0, x1, y1, ...]` coordinate list.
        points: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tension: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        closed: Option<bool>,
    },
    /// Freehand stroke; same encoding as `Line`.
    Pen {
        points: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tension: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        closed: Option<bool>,
    },
    /// Axis-aligned rectangle.
    Rect {
        width: f64,
        height: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        corner_radius: Option<f64>,
    },
    /// Circle; `radius_y` present when stretched into an oval.
    Circle {
        radius_x: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        radius_y: Option<f64>,
    },
    /// Ellipse with independent radii.
    Ellipse {
        radius_x: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        radius_y: Option<f64>,
    },
    /// Regular polygon.
    Polygon { sides: u32, radius: f64 },
    /// SVG path data.
    Path { data: String },
}

/// A drawable shape. `layer_id` is a foreign reference to a `Layer`, not
/// ownership — a shape belongs to exactly one layer at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Client-generated shape id. Excluded from the sync checksum.
    pub id: String,
    /// Id of the layer this shape belongs to.
    pub layer_id: String,
    /// Left/anchor x in world coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Top/anchor y in world coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Clockwise rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(flatten)]
    pub style: Style,
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Shape {
    /// Create a shape with a fresh id and default style.
    #[must_use]
    pub fn new(layer_id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            layer_id: layer_id.into(),
            x: None,
            y: None,
            rotation: None,
            style: Style::default(),
            geometry,
        }
    }
}

// =============================================================================
// COMMENT
// =============================================================================

/// A positioned board comment.
///
/// A comment without a `backend_id` is *temporary*: it exists only locally
/// until explicitly saved (which replaces it with the persisted record) or
/// cancelled (which drops it with no remote call).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Local id; temporary comments use the `temp-` prefix.
    pub id: String,
    /// Id assigned by the comments service once persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<String>,
    /// Author id.
    pub user_id: String,
    /// Board this comment belongs to.
    pub dashboard_id: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Comment {
    /// `true` while the comment exists only locally.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.backend_id.is_none()
    }
}

// =============================================================================
// SCENE MODEL
// =============================================================================

/// In-memory authoritative state for one open board.
#[derive(Debug, Clone)]
pub struct SceneModel {
    /// Ordered layers; index is z-order.
    pub layers: Vec<Layer>,
    pub shapes: Vec<Shape>,
    pub comments: Vec<Comment>,
    /// Id of the layer new shapes are drawn onto.
    pub current_layer: String,
}

impl SceneModel {
    /// Create a scene with one default layer selected.
    #[must_use]
    pub fn new() -> Self {
        let layer = Layer::new("Layer 1");
        let current = layer.id.clone();
        Self { layers: vec![layer], shapes: Vec::new(), comments: Vec::new(), current_layer: current }
    }

    /// Look up a layer by id.
    #[must_use]
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Append a new layer named `Layer {n}` and select it. Returns its id.
    pub fn add_layer(&mut self) -> String {
        let layer = Layer::new(format!("Layer {}", self.layers.len() + 1));
        let id = layer.id.clone();
        self.layers.push(layer);
        self.current_layer = id.clone();
        id
    }

    /// Remove a layer and cascade-remove its shapes.
    ///
    /// Returns `false` without mutating when the layer is unknown or is the
    /// last remaining layer.
    pub fn remove_layer(&mut self, id: &str) -> bool {
        if self.layers.len() == 1 || self.layer(id).is_none() {
            return false;
        }
        self.layers.retain(|l| l.id != id);
        self.shapes.retain(|s| s.layer_id != id);
        if self.current_layer == id {
            self.current_layer = self.layers[0].id.clone();
        }
        true
    }

    /// Flip a layer's visibility. Returns `false` if the layer is unknown.
    pub fn toggle_layer_visibility(&mut self, id: &str) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    /// Flip a layer's lock flag. Returns `false` if the layer is unknown.
    pub fn toggle_layer_lock(&mut self, id: &str) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.locked = !layer.locked;
                true
            }
            None => false,
        }
    }

    /// Add a shape. Returns `false` when `layer_id` references no layer.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        if self.layer(&shape.layer_id).is_none() {
            return false;
        }
        self.shapes.push(shape);
        true
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(idx))
    }

    /// Mutable access to a shape by id.
    pub fn shape_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Shapes on visible layers — the persisted set and the checksum input.
    #[must_use]
    pub fn persistable_shapes(&self) -> Vec<&Shape> {
        self.shapes
            .iter()
            .filter(|s| self.layer(&s.layer_id).is_some_and(|l| l.visible))
            .collect()
    }

    /// Wholesale-replace layers and shapes from a loaded snapshot.
    ///
    /// Injects a default layer when the snapshot has none (a genuinely new
    /// board), drops shapes whose layer is missing from the snapshot, selects
    /// the first layer, and leaves comments alone.
    pub fn replace_board(&mut self, layers: Vec<Layer>, shapes: Vec<Shape>) {
        self.layers = if layers.is_empty() { vec![Layer::new("Layer 1")] } else { layers };
        self.shapes = shapes;
        let layers = &self.layers;
        self.shapes.retain(|s| layers.iter().any(|l| l.id == s.layer_id));
        self.current_layer = self.layers[0].id.clone();
    }
}

impl Default for SceneModel {
    fn default() -> Self {
        Self::new()
    }
}
