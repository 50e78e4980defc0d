//! Layout output: positioned components, routed connections and the
//! diagnostics collected along the way.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use nagare_core::{
    anchor::Anchor,
    geometry::{Bounds, Point},
};
use nagare_parser::Diagnostic;

use super::{registry::PropertyValue, style::ConnectionStyle};

/// Component id to absolute bounds. When an id is declared more than once
/// the last declaration wins.
pub type NodeIndex = IndexMap<String, Bounds>;

/// A component with its final absolute bounds.
///
/// Serialized with the bounds inlined as `x`, `y`, `width` and `height`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    id: String,
    type_tag: String,
    /// Id of the enclosing container, if any.
    parent: Option<String>,
    depth: usize,
    #[serde(flatten)]
    bounds: Bounds,
    props: IndexMap<&'static str, PropertyValue>,
}

impl Component {
    pub(super) fn new(
        id: String,
        type_tag: String,
        parent: Option<String>,
        depth: usize,
        bounds: Bounds,
        props: IndexMap<&'static str, PropertyValue>,
    ) -> Self {
        Self {
            id,
            type_tag,
            parent,
            depth,
            bounds,
            props,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The declared type, or the tag of the factory that was used when no
    /// type was declared.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Display properties in schema order, including defaults.
    pub fn props(&self) -> &IndexMap<&'static str, PropertyValue> {
        &self.props
    }

    pub fn prop(&self, key: &str) -> Option<&PropertyValue> {
        self.props.get(key)
    }
}

/// A connection with its orthogonal polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedConnection {
    from_id: String,
    to_id: String,
    from_anchor: Anchor,
    to_anchor: Anchor,
    points: Vec<Point>,
    style: ConnectionStyle,
    marker_id: String,
}

impl RoutedConnection {
    pub(super) fn new(
        from_id: String,
        to_id: String,
        from_anchor: Anchor,
        to_anchor: Anchor,
        points: Vec<Point>,
        style: ConnectionStyle,
        marker_id: String,
    ) -> Self {
        Self {
            from_id,
            to_id,
            from_anchor,
            to_anchor,
            points,
            style,
            marker_id,
        }
    }

    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    pub fn from_anchor(&self) -> &Anchor {
        &self.from_anchor
    }

    pub fn to_anchor(&self) -> &Anchor {
        &self.to_anchor
    }

    /// Two points for a straight segment, four for an elbow.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// The intermediate points of an elbow; empty for a straight segment.
    pub fn bends(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }

    pub fn style(&self) -> &ConnectionStyle {
        &self.style
    }

    /// Identifier of the arrowhead marker, unique within one [`Layout`].
    pub fn marker_id(&self) -> &str {
        &self.marker_id
    }
}

/// The computed layout of a diagram.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    bounds: Bounds,
    components: Vec<Component>,
    nodes: NodeIndex,
    connections: Vec<RoutedConnection>,
    #[serde(serialize_with = "serialize_diagnostics")]
    diagnostics: Vec<Diagnostic>,
}

impl Layout {
    pub(super) fn new(
        bounds: Bounds,
        components: Vec<Component>,
        nodes: NodeIndex,
        connections: Vec<RoutedConnection>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            bounds,
            components,
            nodes,
            connections,
            diagnostics,
        }
    }

    /// The canvas rectangle, anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Components in declaration order, each container before its children.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The last component declared with `id`.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().rev().find(|c| c.id == id)
    }

    pub fn nodes(&self) -> &NodeIndex {
        &self.nodes
    }

    /// Connections in source order. Connections with a missing endpoint are
    /// left out.
    pub fn connections(&self) -> &[RoutedConnection] {
        &self.connections
    }

    /// Warnings raised while laying out, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn serialize_diagnostics<S: Serializer>(
    diagnostics: &[Diagnostic],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(diagnostics.iter().map(ToString::to_string))
}
