//! The layout engine.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, info, trace, warn};

use nagare_core::{
    anchor::Axis,
    geometry::{Bounds, Point, Size},
    properties::{self, PropertyError},
};
use nagare_parser::{Connection, Diagnostic, ErrorCode, Node, PropertyBlock};

use crate::config::AppConfig;

use super::{
    alignment,
    component::{Component, Layout, NodeIndex, RoutedConnection},
    placement::{CanvasSize, Coordinate, Placement},
    registry::{ComponentFactory, ComponentProps, ComponentRegistry},
    routing,
    shape::Shape,
    style::ConnectionStyle,
};

/// Name of the root block that overrides the canvas size.
pub const CANVAS_BLOCK: &str = "layout";

/// Offset of a container's content area, as a fraction of its size.
const CONTENT_INSET_X: f32 = 0.01875;
const CONTENT_INSET_Y: f32 = 0.133_333_3;

/// Builder for a [`LayoutEngine`].
#[derive(Debug)]
pub struct EngineBuilder {
    canvas: Size,
    elbow_padding: f32,
    registry: ComponentRegistry,
}

impl EngineBuilder {
    /// Create a builder with the default canvas, routing constants and the
    /// built-in component types.
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create a builder using the canvas and routing sections of `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            canvas: Size::new(
                config.layout().canvas_width(),
                config.layout().canvas_height(),
            ),
            elbow_padding: config.routing().elbow_padding(),
            registry: ComponentRegistry::with_builtins(),
        }
    }

    /// Set the canvas size used when the source has no `@layout` block
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas = size;
        self
    }

    /// Set how far an elbow connector travels before turning
    pub fn with_elbow_padding(mut self, padding: f32) -> Self {
        self.elbow_padding = padding;
        self
    }

    /// Replace the component registry
    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> LayoutEngine {
        LayoutEngine {
            canvas: self.canvas,
            elbow_padding: self.elbow_padding,
            registry: self.registry,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns a parse tree into a [`Layout`].
///
/// Layout never fails. Invalid property blocks, unresolvable alignment
/// references and dangling connections are skipped and reported as warnings
/// on [`Layout::diagnostics`].
#[derive(Debug)]
pub struct LayoutEngine {
    canvas: Size,
    elbow_padding: f32,
    registry: ComponentRegistry,
}

impl LayoutEngine {
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Registers a component type, replacing any type with the same tag.
    pub fn register(
        &mut self,
        factory: impl ComponentFactory + 'static,
    ) -> Option<Box<dyn ComponentFactory>> {
        self.registry.register(factory)
    }

    /// Computes the layout of `root`.
    ///
    /// The same tree always produces the same layout.
    pub fn layout(&self, root: &Node) -> Layout {
        let mut diagnostics = Vec::new();
        let canvas = self.canvas_size(root, &mut diagnostics);

        let mut shapes = Vec::with_capacity(root.component_count());
        for child in &root.children {
            self.place(child, None, &mut shapes, &mut diagnostics);
        }

        let mut index: IndexMap<String, usize> = IndexMap::with_capacity(shapes.len());
        for (i, shape) in shapes.iter().enumerate() {
            if index.insert(shape.id.clone(), i).is_some() {
                debug!(id = shape.id.as_str(); "Duplicate component id, last declaration wins");
            }
        }

        alignment::resolve(&mut shapes, &index, &mut diagnostics);

        let nodes: NodeIndex = index
            .iter()
            .map(|(id, &i)| (id.clone(), shapes[i].bounds))
            .collect();

        let connections = self.route_connections(&root.connections, &nodes, &mut diagnostics);

        let components: Vec<Component> = shapes
            .iter()
            .map(|shape| {
                Component::new(
                    shape.id.clone(),
                    shape.type_tag.clone(),
                    shape.parent.map(|p| shapes[p].id.clone()),
                    shape.depth,
                    shape.bounds,
                    shape.props.to_values().into_iter().collect(),
                )
            })
            .collect();

        info!(
            components = components.len(),
            connections = connections.len(),
            warnings = diagnostics.len();
            "Layout calculated"
        );

        Layout::new(
            Bounds::new_from_top_left(Point::default(), canvas),
            components,
            nodes,
            connections,
            diagnostics,
        )
    }

    fn canvas_size(&self, root: &Node, diagnostics: &mut Vec<Diagnostic>) -> Size {
        let Some(block) = root.globals.get(CANVAS_BLOCK) else {
            return self.canvas;
        };

        match properties::parse::<CanvasSize>(block.raw()) {
            Ok(canvas) => {
                let size = Size::new(
                    canvas.width.unwrap_or(self.canvas.width()),
                    canvas.height.unwrap_or(self.canvas.height()),
                );
                debug!(width = size.width(), height = size.height(); "Canvas size overridden");
                size
            }
            Err(err) => {
                report(diagnostics, invalid_block(block, &err));
                self.canvas
            }
        }
    }

    fn place(
        &self,
        node: &Node,
        parent: Option<usize>,
        shapes: &mut Vec<Shape>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let factory = self
            .registry
            .resolve(node.type_name.as_deref(), node.is_container());

        let mut shape = Shape {
            id: node.text.clone(),
            type_tag: node
                .type_name
                .clone()
                .unwrap_or_else(|| factory.type_tag().to_string()),
            parent,
            children: Vec::new(),
            depth: node.depth,
            bounds: Bounds::new_from_top_left(Point::default(), factory.default_size()),
            props: factory.create(),
            alignment_refs: BTreeMap::new(),
        };

        if let Some(block) = node.own_block() {
            apply_block(&mut shape, block, true, diagnostics);
        }
        // Containers take their geometry from their own block only.
        if node.state_name.as_deref() != Some(node.text.as_str()) {
            if let Some(block) = node.state_block() {
                apply_block(&mut shape, block, !node.is_container(), diagnostics);
            }
        }

        if let Some(p) = parent {
            let container = shapes[p].bounds;
            let origin = Point::new(
                container.min_x() + container.width() * CONTENT_INSET_X,
                container.min_y() + container.height() * CONTENT_INSET_Y,
            );
            shape.bounds = shape.bounds.translate(origin);
        }

        trace!(
            id = shape.id.as_str(),
            type_tag = shape.type_tag.as_str(),
            bounds:? = shape.bounds;
            "Placed component",
        );

        let index = shapes.len();
        shapes.push(shape);
        if let Some(p) = parent {
            shapes[p].children.push(index);
        }

        for child in &node.children {
            self.place(child, Some(index), shapes, diagnostics);
        }
    }

    fn route_connections(
        &self,
        connections: &[Connection],
        nodes: &NodeIndex,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<RoutedConnection> {
        let mut routed = Vec::with_capacity(connections.len());

        for conn in connections {
            let (Some(&from), Some(&to)) = (nodes.get(&conn.from_id), nodes.get(&conn.to_id))
            else {
                report(diagnostics, missing_endpoints(conn, nodes));
                continue;
            };

            let style = if conn.style.trim().is_empty() {
                ConnectionStyle::default()
            } else {
                ConnectionStyle::parse(&conn.style).unwrap_or_else(|err| {
                    report(
                        diagnostics,
                        Diagnostic::warning(format!("invalid connection style: {err}"))
                            .with_code(ErrorCode::E200)
                            .with_label(conn.span, "default style used"),
                    );
                    ConnectionStyle::default()
                })
            };

            let points = routing::route(
                conn.from_anchor.point_on(from),
                &conn.from_anchor,
                conn.to_anchor.point_on(to),
                &conn.to_anchor,
                self.elbow_padding,
            );

            debug!(
                from = conn.from_id.as_str(),
                to = conn.to_id.as_str(),
                points = points.len();
                "Routed connection"
            );

            let marker_id = format!("arrow-{}", routed.len() + 1);
            routed.push(RoutedConnection::new(
                conn.from_id.clone(),
                conn.to_id.clone(),
                conn.from_anchor.clone(),
                conn.to_anchor.clone(),
                points,
                style,
                marker_id,
            ));
        }

        routed
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

/// Lays out `root` on a `canvas_width` × `canvas_height` canvas with the
/// built-in component types.
///
/// A root `@layout(w: .., h: ..)` block still takes precedence over the
/// given size.
pub fn layout(root: &Node, canvas_width: f32, canvas_height: f32) -> Layout {
    EngineBuilder::new()
        .with_canvas_size(Size::new(canvas_width, canvas_height))
        .build()
        .layout(root)
}

/// Applies one property block to `shape`, all or nothing.
fn apply_block(
    shape: &mut Shape,
    block: &PropertyBlock,
    geometry: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match read_block(shape.props.as_mut(), block.raw(), geometry) {
        Ok(placement) => commit(shape, placement, block),
        Err(err) => report(diagnostics, invalid_block(block, &err)),
    }
}

fn read_block(
    props: &mut dyn ComponentProps,
    raw: &str,
    geometry: bool,
) -> Result<Placement, PropertyError> {
    let placement = if geometry {
        properties::parse(raw)?
    } else {
        Placement::default()
    };
    props.merge_block(raw)?;
    Ok(placement)
}

fn commit(shape: &mut Shape, placement: Placement, block: &PropertyBlock) {
    if let Some(width) = placement.width {
        shape.bounds = shape.bounds.with_width(width);
    }
    if let Some(height) = placement.height {
        shape.bounds = shape.bounds.with_height(height);
    }

    for (axis, coordinate) in [
        (Axis::Horizontal, placement.x),
        (Axis::Vertical, placement.y),
    ] {
        match coordinate {
            Some(Coordinate::Absolute(value)) => shape.set_position(axis, value),
            Some(Coordinate::Reference(reference)) => {
                shape.set_reference(axis, reference, block.span());
            }
            None => {}
        }
    }
}

/// One warning per dropped connection, naming every endpoint that is missing.
fn missing_endpoints(conn: &Connection, nodes: &NodeIndex) -> Diagnostic {
    let mut missing: Vec<&str> = Vec::with_capacity(2);
    for id in [&conn.from_id, &conn.to_id] {
        if !nodes.contains_key(id) && !missing.contains(&id.as_str()) {
            missing.push(id);
        }
    }
    let names = missing
        .iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(" and ");
    let noun = if missing.len() > 1 { "endpoints" } else { "endpoint" };

    Diagnostic::warning(format!("connection {noun} {names} not found"))
        .with_code(ErrorCode::E204)
        .with_label(conn.span, "connection dropped")
}

fn invalid_block(block: &PropertyBlock, err: &PropertyError) -> Diagnostic {
    Diagnostic::warning(format!("invalid property block `@{}`: {err}", block.name()))
        .with_code(ErrorCode::E200)
        .with_label(block.span(), "block skipped")
}

pub(super) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
    diagnostics.push(diagnostic);
}
