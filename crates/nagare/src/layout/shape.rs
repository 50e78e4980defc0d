//! Working state of one component while the layout is computed.

use std::collections::BTreeMap;

use nagare_core::{
    anchor::Axis,
    geometry::{Bounds, Point},
};
use nagare_parser::Span;

use super::registry::ComponentProps;

/// An alignment reference waiting for the second pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PendingRef {
    /// The text after `&`, for example `browser.c`.
    pub(super) reference: String,
    /// Span of the property block the reference was written in.
    pub(super) span: Span,
}

/// A component instance with absolute bounds.
pub(super) struct Shape {
    pub(super) id: String,
    pub(super) type_tag: String,
    pub(super) parent: Option<usize>,
    pub(super) children: Vec<usize>,
    pub(super) depth: usize,
    pub(super) bounds: Bounds,
    pub(super) props: Box<dyn ComponentProps>,
    pub(super) alignment_refs: BTreeMap<Axis, PendingRef>,
}

impl Shape {
    /// Moves the shape on `axis` so that its minimum edge is at `value`.
    ///
    /// A literal position replaces any reference recorded earlier for the
    /// same axis.
    pub(super) fn set_position(&mut self, axis: Axis, value: f32) {
        self.bounds = match axis {
            Axis::Horizontal => self.bounds.with_min_x(value),
            Axis::Vertical => self.bounds.with_min_y(value),
        };
        self.alignment_refs.remove(&axis);
    }

    pub(super) fn set_reference(&mut self, axis: Axis, reference: String, span: Span) {
        self.alignment_refs
            .insert(axis, PendingRef { reference, span });
    }
}

/// Translates shape `index` and all of its descendants by `offset`.
pub(super) fn translate_tree(shapes: &mut [Shape], index: usize, offset: Point) {
    shapes[index].bounds = shapes[index].bounds.translate(offset);
    let children = shapes[index].children.clone();
    for child in children {
        translate_tree(shapes, child, offset);
    }
}
