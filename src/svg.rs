//! SVG rendering of a laid-out [`CanvasGroups`].
//!
//! One `<g class="page-group">` per canvas group, with a rect per canvas
//! and a label. The current group is highlighted. Spread members drop the
//! stroke on their shared edge so a spread reads as one sheet.
//!
//! # Example
//!
//! ```
//! use zencanvas::{CanvasSource, LayoutParams, ViewerLayout, layout_canvases};
//! use zencanvas::svg::render_canvas_groups_svg;
//!
//! let sources = vec![CanvasSource::new(100, 200); 5];
//! let params = LayoutParams {
//!     layout: ViewerLayout::TwoPage,
//!     ..LayoutParams::default()
//! };
//! let groups = layout_canvases(&sources, &params);
//!
//! let svg = render_canvas_groups_svg(&groups, Some(1));
//! assert!(svg.contains("page-group current"));
//! ```

use crate::canvas_groups::CanvasGroups;
use crate::geometry::Rect;
use crate::model::CanvasGroup;

/// Maximum pixel width of the rendered document.
const MAX_W: f64 = 960.0;
/// Maximum pixel height of the rendered document.
const MAX_H: f64 = 480.0;
/// Padding around the layout, as a fraction of its larger side.
const PAD_FRACTION: f64 = 0.05;
/// Label height as a fraction of the tallest group.
const LABEL_FRACTION: f64 = 0.08;

/// Render every group of `groups` into a complete SVG document.
///
/// Coordinates in the `viewBox` are layout units, so the document can be
/// compared directly against group and canvas rects.
pub fn render_canvas_groups_svg(groups: &CanvasGroups, current: Option<usize>) -> String {
    let Some(bounds) = layout_bounds(groups.groups()) else {
        return String::from(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#);
    };

    let tallest = groups.groups().iter().map(|g| g.rect.height).fold(0.0, f64::max);
    let label_h = tallest * LABEL_FRACTION;
    let pad = bounds.width.max(bounds.height) * PAD_FRACTION;
    let view = Rect::new(
        bounds.x - pad,
        bounds.y - pad - label_h,
        bounds.width + 2.0 * pad,
        bounds.height + 2.0 * pad + label_h,
    );
    let scale = (MAX_W / view.width).min(MAX_H / view.height);

    let mut svg = String::with_capacity(1024 + groups.total_canvases() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        (view.width * scale) as u32,
        (view.height * scale) as u32,
        view.x,
        view.y,
        view.width,
        view.height
    ));
    svg.push('\n');

    // Stroke widths are in layout units; scale them so they stay ~1px.
    let stroke = 1.0 / scale;
    svg.push_str(&format!(
        r##"<style>
  text {{ font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; font-size: {label:.1}px; fill: #333; }}
  .tile {{ fill: #e8e8e8; stroke: #999; stroke-width: {stroke:.3}; }}
  .current .tile {{ fill: #6ba3d6; stroke: #2c6faa; stroke-width: {current:.3}; }}
  .outline {{ fill: none; stroke: #bbb; stroke-width: {stroke:.3}; stroke-dasharray: {dash:.1},{dash:.1}; }}
  @media (prefers-color-scheme: dark) {{
    text {{ fill: #e0e0e0; }}
    .tile {{ fill: #2d2d2d; stroke: #555; }}
    .current .tile {{ fill: #3a72a4; stroke: #5a9fd4; }}
    .outline {{ stroke: #666; }}
  }}
</style>
"##,
        label = label_h * 0.7,
        stroke = stroke,
        current = stroke * 2.0,
        dash = stroke * 4.0,
    ));

    for (i, group) in groups.groups().iter().enumerate() {
        let class = if current == Some(i) {
            "page-group current"
        } else {
            "page-group"
        };
        svg.push_str(&format!(r#"<g class="{class}" data-index="{i}">"#));
        svg.push('\n');

        let r = group.rect;
        svg.push_str(&format!(
            r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outline"/>"#,
            r.x, r.y, r.width, r.height
        ));
        svg.push('\n');

        let side_by_side = is_side_by_side(group);
        for (position, tile) in group.tiles.iter().enumerate() {
            let t = tile.rect;
            let dash = if side_by_side {
                spread_dasharray(&t, position == 0)
            } else {
                String::new()
            };
            svg.push_str(&format!(
                r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="tile" data-canvas="{}"{}/>"#,
                t.x, t.y, t.width, t.height, tile.canvas_index, dash
            ));
            svg.push('\n');
        }

        svg.push_str(&format!(
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            r.center_x(),
            r.y - label_h * 0.25,
            escape_xml(&groups.label(i))
        ));
        svg.push_str("\n</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn layout_bounds(groups: &[CanvasGroup]) -> Option<Rect> {
    let mut iter = groups.iter().map(|g| g.rect);
    let first = iter.next()?;
    Some(iter.fold(first, |acc, r| acc.union(&r)))
}

/// Two members placed next to each other horizontally.
fn is_side_by_side(group: &CanvasGroup) -> bool {
    match group.tiles.as_slice() {
        [a, b] => a.rect.x != b.rect.x,
        _ => false,
    }
}

/// Dash pattern that skips the edge shared with the other spread member.
///
/// A rect's stroke starts at its top-left corner and runs clockwise: top,
/// right, bottom, left.
fn spread_dasharray(rect: &Rect, is_left_member: bool) -> String {
    let (w, h) = (rect.width, rect.height);
    if is_left_member {
        // top, skip right, bottom + left
        format!(r#" style="stroke-dasharray: {:.1}, {:.1}, {:.1}""#, w, h, w + h)
    } else {
        // top + right + bottom, skip left
        format!(r#" style="stroke-dasharray: {:.1}, {:.1}""#, 2.0 * w + h, h)
    }
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
