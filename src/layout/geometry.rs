use serde::{Deserialize, Serialize};

use crate::layout::connections::Connection;

/// Pixel layout of the layer rows on the connection canvas.
///
/// Rows are single lines of square boxes, centred horizontally and stacked
/// top to bottom with a fixed gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub box_size: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    /// Distance from the canvas top to the first row's boxes.
    pub top_offset: f64,
    /// Box border width; bottom anchors sit below it.
    pub border: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            canvas_width: 1200.0,
            canvas_height: 800.0,
            box_size: 30.0,
            horizontal_gap: 20.0,
            vertical_gap: 102.0,
            top_offset: 3.0,
            border: 2.0,
        }
    }
}

/// A line on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Geometry {
    /// Width of a row of `units` boxes, gaps included.
    pub fn row_width(&self, units: usize) -> f64 {
        if units == 0 {
            return 0.0;
        }
        units as f64 * (self.box_size + self.horizontal_gap) - self.horizontal_gap
    }

    /// Left edge of box `index` in a row of `units` boxes.
    pub fn box_left(&self, units: usize, index: usize) -> f64 {
        let start = (self.canvas_width - self.row_width(units)) / 2.0;
        start + index as f64 * (self.box_size + self.horizontal_gap)
    }

    /// Horizontal centre of box `index` in a row of `units` boxes.
    pub fn unit_center_x(&self, units: usize, index: usize) -> f64 {
        self.box_left(units, index) + self.box_size / 2.0
    }

    /// Top edge of row `row` (0 = top).
    pub fn row_top(&self, row: usize) -> f64 {
        row as f64 * (self.vertical_gap + self.box_size) + self.top_offset
    }

    /// Where lines leave a box in row `row`: just under its bottom border.
    pub fn row_bottom(&self, row: usize) -> f64 {
        self.row_top(row) + self.box_size + self.border
    }

    /// Endpoints of `conn`: bottom centre of the source box to top centre of
    /// the target box. `rows` holds unit counts in render order.
    ///
    /// Returns `None` when the connection refers to a row outside `rows`.
    pub fn segment(&self, conn: &Connection, rows: &[usize]) -> Option<Segment> {
        let from_units = *rows.get(conn.from_layer)?;
        let to_units = *rows.get(conn.to_layer)?;
        Some(Segment {
            x1: self.unit_center_x(from_units, conn.from_unit),
            y1: self.row_bottom(conn.from_layer),
            x2: self.unit_center_x(to_units, conn.to_unit),
            y2: self.row_top(conn.to_layer),
        })
    }

    pub fn segments(&self, conns: &[Connection], rows: &[usize]) -> Vec<Segment> {
        conns.iter().filter_map(|c| self.segment(c, rows)).collect()
    }
}
