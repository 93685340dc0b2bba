use super::{EdgeView, NodeView, Scene};
use crate::curve::fmt_num;
use crate::graph::NodeRole;
use crate::layout;
use std::fmt::Write;

const ARROW_SIZE: f64 = 10.0;
const HANDLE_RADIUS: f64 = 6.0;

/// Output settings for `Scene::to_svg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    pub width: f64,
    pub height: f64,
    pub show_handles: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            show_handles: true,
        }
    }
}

impl Scene {
    /// Serializes the scene as a standalone SVG document.
    ///
    /// Content is drawn in canvas space inside a group carrying the viewport
    /// transform, so the output matches what the editor shows on screen.
    pub fn to_svg(&self, options: &SvgOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(options.width),
            h = fmt_num(options.height),
        );
        out.push_str(concat!(
            r#"  <defs><marker id="arrowhead" markerWidth="10" markerHeight="7" refX="10" refY="3.5" orient="auto">"#,
            r##"<polygon points="0 0, 10 3.5, 0 7" fill="#94a3b8"/></marker></defs>"##,
            "\n"
        ));
        let _ = writeln!(
            out,
            r#"  <g transform="translate({} {}) scale({})">"#,
            fmt_num(self.pan.x),
            fmt_num(self.pan.y),
            fmt_num(self.zoom),
        );

        for edge in &self.edges {
            write_edge(&mut out, edge);
        }
        if let Some(preview) = &self.preview {
            let _ = writeln!(
                out,
                r##"    <path class="preview" d="{}" fill="none" stroke="#6366f1" stroke-width="2" stroke-dasharray="6 4"/>"##,
                preview.to_svg_path()
            );
        }
        for node in &self.nodes {
            write_node(&mut out, node, options);
        }

        out.push_str("  </g>\n</svg>\n");
        out
    }
}

fn write_edge(out: &mut String, edge: &EdgeView) {
    let stroke = if edge.selected { "#6366f1" } else { "#94a3b8" };
    let _ = writeln!(
        out,
        r#"    <path id="{}" class="edge" d="{}" fill="none" stroke="{}" stroke-width="{}" marker-end="url(#arrowhead)"/>"#,
        escape(edge.id.as_str()),
        edge.path,
        stroke,
        if edge.selected { 3 } else { 2 },
    );
    if let Some(arrow) = &edge.arrow {
        let points = arrow
            .triangle(ARROW_SIZE)
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            r##"    <polygon class="flow-arrow" points="{}" fill="#6366f1"/>"##,
            points
        );
    }
    if let Some(center) = &edge.delete_affordance {
        let _ = writeln!(
            out,
            r##"    <circle class="edge-delete" cx="{}" cy="{}" r="{}" fill="#ef4444"/>"##,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(layout::EDGE_DELETE_RADIUS),
        );
    }
}

fn write_node(out: &mut String, node: &NodeView, options: &SvgOptions) {
    let r = &node.rect;
    let fill = match node.role {
        NodeRole::Trigger => "#ecfdf5",
        NodeRole::Tool => "#eff6ff",
        NodeRole::Processor => "#f5f3ff",
        NodeRole::Sink => "#fff7ed",
    };
    let stroke = if node.selected { "#6366f1" } else { "#cbd5e1" };
    let _ = writeln!(
        out,
        r#"    <g id="{}" class="node node-{}">"#,
        escape(node.id.as_str()),
        escape(&node.type_tag),
    );
    let _ = writeln!(
        out,
        r#"      <rect x="{}" y="{}" width="{}" height="{}" rx="12" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt_num(r.origin.x),
        fmt_num(r.origin.y),
        fmt_num(r.width),
        fmt_num(r.height),
        fill,
        stroke,
        if node.selected { 3 } else { 1 },
    );
    let _ = writeln!(
        out,
        r##"      <text x="{}" y="{}" font-family="sans-serif" font-size="14" font-weight="600" fill="#0f172a">{}</text>"##,
        fmt_num(r.origin.x + 16.0),
        fmt_num(r.origin.y + 28.0),
        escape(&node.label),
    );
    if !node.description.is_empty() {
        let _ = writeln!(
            out,
            r##"      <text x="{}" y="{}" font-family="sans-serif" font-size="12" fill="#64748b">{}</text>"##,
            fmt_num(r.origin.x + 16.0),
            fmt_num(r.origin.y + 48.0),
            escape(&node.description),
        );
    }
    if options.show_handles {
        for handle in &node.handles {
            let _ = writeln!(
                out,
                r##"      <circle class="handle handle-{}" cx="{}" cy="{}" r="{}" fill="#ffffff" stroke="#64748b"/>"##,
                handle.name,
                fmt_num(handle.anchor.x),
                fmt_num(handle.anchor.y),
                fmt_num(HANDLE_RADIUS),
            );
        }
    }
    if let Some(control) = &node.delete_control {
        let _ = writeln!(
            out,
            r##"      <rect class="node-delete" x="{}" y="{}" width="{}" height="{}" rx="4" fill="#ef4444"/>"##,
            fmt_num(control.origin.x),
            fmt_num(control.origin.y),
            fmt_num(control.width),
            fmt_num(control.height),
        );
    }
    out.push_str("    </g>\n");
}

/// Escapes text for use in SVG content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
