use crate::grid::Grid;
use crate::layers::{LayerKind, LayerState};
use crate::layout::{Geometry, Segment};
use crate::view::palette::{box_fill, cell_color, BOX_BORDER, LINE_STROKE, LINE_WIDTH};

/// Room above the first row for the output labels.
const LABEL_SPACE: f64 = 24.0;

/// Order of the rendered rows, top to bottom.
pub const RENDER_ORDER: [LayerKind; 3] = [LayerKind::Output, LayerKind::Hidden2, LayerKind::Hidden1];

/// The drawing grid as a CSS grid of cells. Each cell carries its
/// coordinates in `data-row` / `data-col` for the pointer handlers.
pub fn render_grid(grid: &Grid, cell_px: u32) -> String {
    let n = grid.size();
    let mut html = format!(
        r#"<div id="grid" style="display:grid;grid-template-columns:repeat({n}, {px}px);gap:1px;user-select:none">"#,
        n = n,
        px = cell_px,
    );
    for row in 0..n {
        for col in 0..n {
            html.push_str(&format!(
                r#"<div class="cell" data-row="{r}" data-col="{c}" style="width:{px}px;height:{px}px;background:{bg}"></div>"#,
                r = row,
                c = col,
                px = cell_px,
                bg = cell_color(grid.get(row, col)),
            ));
        }
    }
    html.push_str("</div>");
    html
}

/// One row of layer boxes as SVG `<rect>`s, with optional index labels
/// above each box.
pub fn render_layer_row(kind: LayerKind, values: &[f64], row: usize, geometry: &Geometry, labeled: bool) -> String {
    let top = geometry.row_top(row);
    let mut svg = String::new();
    for (i, &v) in values.iter().enumerate() {
        let left = geometry.box_left(values.len(), i);
        svg.push_str(&format!(
            r#"<rect id="{id}-{i}" x="{x:.1}" y="{y:.1}" width="{s}" height="{s}" rx="5" fill="{fill}" stroke="{border}" stroke-width="2"/>"#,
            id = kind.name(),
            i = i,
            x = left,
            y = top,
            s = geometry.box_size,
            fill = box_fill(v),
            border = BOX_BORDER,
        ));
        if labeled {
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="14" font-weight="bold">{i}</text>"#,
                x = left + geometry.box_size / 2.0,
                y = top - 6.0,
                i = i,
            ));
        }
    }
    svg
}

/// Connection lines as SVG `<line>`s.
pub fn render_connections(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
                s.x1, s.y1, s.x2, s.y2, LINE_STROKE, LINE_WIDTH
            )
        })
        .collect()
}

/// The whole network picture: lines underneath, boxes on top, output row
/// labeled with its class index.
pub fn render_network(layers: &LayerState, segments: &[Segment], geometry: &Geometry) -> String {
    let mut body = render_connections(segments);
    for (row, &kind) in RENDER_ORDER.iter().enumerate() {
        body.push_str(&render_layer_row(kind, layers.get(kind), row, geometry, kind == LayerKind::Output));
    }
    format!(
        r#"<svg id="network" width="{w}" height="{h}" viewBox="0 {top} {w} {h}" xmlns="http://www.w3.org/2000/svg">{body}</svg>"#,
        w = geometry.canvas_width,
        h = geometry.canvas_height,
        top = -LABEL_SPACE,
        body = body,
    )
}
