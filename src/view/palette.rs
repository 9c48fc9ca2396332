use crate::grid::Intensity;

/// Connection line stroke.
pub const LINE_STROKE: &str = "rgb(168, 168, 168)";
pub const LINE_WIDTH: u32 = 2;
/// Layer box border.
pub const BOX_BORDER: &str = "#36454F";

/// Background of a grid cell.
pub fn cell_color(cell: Intensity) -> &'static str {
    match cell {
        Intensity::Full => "rgb(0, 51, 51)",
        Intensity::Half => "rgb(64, 112, 115)",
        Intensity::Off  => "rgb(255, 255, 255)",
    }
}

/// Teal fill whose opacity tracks the activation, clamped to [0, 1].
pub fn box_fill(value: f64) -> String {
    let alpha = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    format!("rgba(0, 109, 108, {:.3})", alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_fill_clamps() {
        assert_eq!(box_fill(0.5), "rgba(0, 109, 108, 0.500)");
        assert_eq!(box_fill(-1.0), "rgba(0, 109, 108, 0.000)");
        assert_eq!(box_fill(3.0), "rgba(0, 109, 108, 1.000)");
        assert_eq!(box_fill(f64::NAN), "rgba(0, 109, 108, 0.000)");
    }
}
