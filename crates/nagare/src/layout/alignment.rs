//! Alignment reference resolution.
//!
//! A position written as `&id.keyword` is resolved once every component has
//! absolute bounds. References on each axis form a dependency graph; its
//! strongly connected components are visited dependencies first, so chains
//! resolve the same way regardless of declaration order. Members of a cycle
//! are reported and keep their prior position.
//!
//! A container depends on nothing through its children, but its children
//! depend on it: moving a container moves its children by the same amount
//! before anything that references them is resolved.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;
use petgraph::{algo::tarjan_scc, graph::DiGraph};

use nagare_core::{anchor::Axis, geometry::Point};
use nagare_parser::{Diagnostic, ErrorCode};

use super::{
    engine::report,
    shape::{PendingRef, Shape, translate_tree},
};

/// Which part of the target an aligned shape lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Left edge on `x`, top edge on `y`.
    Start,
    Center,
    /// Right edge on `x`, bottom edge on `y`.
    End,
}

impl Alignment {
    /// Parses an alignment keyword for `axis`, ignoring case.
    ///
    /// `c`/`center` is valid on both axes; `l`/`left` and `r`/`right` only
    /// on `x`; `t`/`top` and `b`/`bottom` only on `y`.
    pub fn parse(axis: Axis, keyword: &str) -> Option<Self> {
        match (axis, keyword.to_ascii_lowercase().as_str()) {
            (_, "c" | "center") => Some(Self::Center),
            (Axis::Horizontal, "l" | "left") | (Axis::Vertical, "t" | "top") => Some(Self::Start),
            (Axis::Horizontal, "r" | "right") | (Axis::Vertical, "b" | "bottom") => Some(Self::End),
            _ => None,
        }
    }

    /// The aligned minimum coordinate of a shape of length `own_len`
    /// against a target spanning `target_start..target_start + target_len`.
    pub fn position(self, target_start: f32, target_len: f32, own_len: f32) -> f32 {
        match self {
            Self::Start => target_start,
            Self::Center => target_start + target_len / 2.0 - own_len / 2.0,
            Self::End => target_start + target_len - own_len,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Request {
    target: usize,
    alignment: Alignment,
}

/// Resolves every pending alignment reference in `shapes`.
///
/// `index` maps component ids to positions in `shapes`. Problems are
/// appended to `diagnostics`; the affected shapes keep their position.
pub(super) fn resolve(
    shapes: &mut [Shape],
    index: &IndexMap<String, usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for axis in [Axis::Horizontal, Axis::Vertical] {
        resolve_axis(axis, shapes, index, diagnostics);
    }
}

fn resolve_axis(
    axis: Axis,
    shapes: &mut [Shape],
    index: &IndexMap<String, usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut graph = DiGraph::<usize, ()>::with_capacity(shapes.len(), shapes.len());
    let nodes: Vec<_> = (0..shapes.len()).map(|i| graph.add_node(i)).collect();
    let mut requests = HashMap::new();

    for (i, shape) in shapes.iter().enumerate() {
        for &child in &shape.children {
            graph.add_edge(nodes[child], nodes[i], ());
        }

        let Some(pending) = shape.alignment_refs.get(&axis) else {
            continue;
        };
        match parse_request(axis, pending, index) {
            Ok(request) => {
                graph.add_edge(nodes[i], nodes[request.target], ());
                requests.insert(i, request);
            }
            Err(diagnostic) => report(diagnostics, diagnostic),
        }
    }

    // Edges point from a shape to what it depends on, so Tarjan's
    // post-order yields dependencies first.
    for scc in tarjan_scc(&graph) {
        let cyclic = scc.len() > 1 || graph.contains_edge(scc[0], scc[0]);
        let mut members: Vec<usize> = scc.iter().map(|node| graph[*node]).collect();
        members.sort_unstable();

        for i in members {
            let Some(request) = requests.get(&i).copied() else {
                continue;
            };
            if cyclic {
                let shape = &shapes[i];
                let span = shape.alignment_refs.get(&axis).map(|p| p.span);
                let mut diagnostic = Diagnostic::warning(format!(
                    "cyclic alignment reference for `{}` on the {axis} axis",
                    shape.id
                ))
                .with_code(ErrorCode::E203)
                .with_help("break the cycle by giving one component a literal position");
                if let Some(span) = span {
                    diagnostic = diagnostic.with_label(span, "part of a reference cycle");
                }
                report(diagnostics, diagnostic);
                continue;
            }
            apply(shapes, i, request, axis);
        }
    }
}

fn parse_request(
    axis: Axis,
    pending: &PendingRef,
    index: &IndexMap<String, usize>,
) -> Result<Request, Diagnostic> {
    let malformed = || {
        Diagnostic::warning(format!("malformed alignment reference `&{}`", pending.reference))
            .with_code(ErrorCode::E202)
            .with_label(pending.span, "in this property block")
            .with_help("write references as `&id.keyword`, for example `&browser.c`")
    };

    let Some((target_id, keyword)) = pending.reference.rsplit_once('.') else {
        return Err(malformed());
    };
    if target_id.is_empty() {
        return Err(malformed());
    }

    let Some(alignment) = Alignment::parse(axis, keyword) else {
        let help = match axis {
            Axis::Horizontal => "use `c`, `l` or `r` on the x axis",
            Axis::Vertical => "use `c`, `t` or `b` on the y axis",
        };
        return Err(Diagnostic::warning(format!(
            "unsupported alignment `{keyword}` on the {axis} axis"
        ))
        .with_code(ErrorCode::E202)
        .with_label(pending.span, "in this property block")
        .with_help(help));
    };

    let Some(&target) = index.get(target_id) else {
        return Err(
            Diagnostic::warning(format!("alignment target `{target_id}` not found"))
                .with_code(ErrorCode::E201)
                .with_label(pending.span, "referenced here"),
        );
    };

    Ok(Request { target, alignment })
}

fn apply(shapes: &mut [Shape], i: usize, request: Request, axis: Axis) {
    let target = shapes[request.target].bounds;
    let own = shapes[i].bounds;

    let offset = match axis {
        Axis::Horizontal => {
            let x = request
                .alignment
                .position(target.min_x(), target.width(), own.width());
            Point::new(x - own.min_x(), 0.0)
        }
        Axis::Vertical => {
            let y = request
                .alignment
                .position(target.min_y(), target.height(), own.height());
            Point::new(0.0, y - own.min_y())
        }
    };

    trace!(
        id = shapes[i].id.as_str(),
        target = shapes[request.target].id.as_str(),
        axis:% = axis;
        "Resolved alignment reference",
    );
    translate_tree(shapes, i, offset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_per_axis() {
        assert_eq!(Alignment::parse(Axis::Vertical, "c"), Some(Alignment::Center));
        assert_eq!(Alignment::parse(Axis::Vertical, "TOP"), Some(Alignment::Start));
        assert_eq!(Alignment::parse(Axis::Vertical, "b"), Some(Alignment::End));
        assert_eq!(Alignment::parse(Axis::Horizontal, "left"), Some(Alignment::Start));
        assert_eq!(Alignment::parse(Axis::Horizontal, "r"), Some(Alignment::End));

        assert_eq!(Alignment::parse(Axis::Horizontal, "top"), None);
        assert_eq!(Alignment::parse(Axis::Vertical, "left"), None);
        assert_eq!(Alignment::parse(Axis::Vertical, "middle"), None);
    }

    #[test]
    fn test_positions() {
        // Target spans 100..220, own length 50
        assert_eq!(Alignment::Start.position(100.0, 120.0, 50.0), 100.0);
        assert_eq!(Alignment::Center.position(100.0, 120.0, 50.0), 135.0);
        assert_eq!(Alignment::End.position(100.0, 120.0, 50.0), 170.0);
    }
}
